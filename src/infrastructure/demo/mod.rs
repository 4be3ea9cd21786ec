//! Offline collaborators with deterministic seeded data
//!
//! Used with `--demo` or when no API URL is configured. Records created
//! through the demo save handler are kept in memory and show up on reload.

mod seed;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::controller::modal::{FormValues, SubmitHandler, SubmitOutcome};
use crate::controller::registry::{DomainSource, LoaderRegistry, SectionLoader};
use crate::core::{
    DomainDescriptor, DomainId, LoaderError, Record, RecordList, SectionId, SubmitError,
};
use crate::modules::forms::FormBackend;

pub use seed::seeded_records;

/// Sections the demo backend does not serve
pub const UNSUPPORTED: [SectionId; 1] = [SectionId::Mail];

type Created = Arc<RwLock<BTreeMap<(DomainId, SectionId), Vec<Record>>>>;

#[derive(Clone, Default)]
pub struct DemoBackend {
    created: Created,
    latency: Duration,
}

impl DemoBackend {
    pub fn new(latency: Duration) -> Self {
        Self {
            created: Created::default(),
            latency,
        }
    }

    pub fn domains() -> Vec<DomainDescriptor> {
        vec![
            DomainDescriptor::new("domain1", "Lisbon Tours"),
            DomainDescriptor::new("domain2", "Porto Experiences"),
        ]
    }

    pub fn domain_source(&self) -> Arc<dyn DomainSource> {
        Arc::new(DemoDomains {
            latency: self.latency,
        })
    }

    /// Registry covering every section except [`UNSUPPORTED`]
    pub fn registry(&self) -> LoaderRegistry {
        let loader: Arc<dyn SectionLoader> = Arc::new(DemoLoader {
            created: Arc::clone(&self.created),
            latency: self.latency,
        });
        let sections = SectionId::ALL
            .into_iter()
            .filter(|section| !UNSUPPORTED.contains(section));
        let mut registry = LoaderRegistry::new();
        registry.register_many(sections, loader);
        registry
    }
}

struct DemoDomains {
    latency: Duration,
}

#[async_trait::async_trait]
impl DomainSource for DemoDomains {
    async fn domains(&self) -> Result<Vec<DomainDescriptor>, LoaderError> {
        tokio::time::sleep(self.latency).await;
        Ok(DemoBackend::domains())
    }
}

struct DemoLoader {
    created: Created,
    latency: Duration,
}

#[async_trait::async_trait]
impl SectionLoader for DemoLoader {
    async fn load(&self, section: SectionId, domain: &DomainId) -> Result<RecordList, LoaderError> {
        tokio::time::sleep(self.latency).await;
        if !DemoBackend::domains().iter().any(|known| &known.id == domain) {
            return Err(LoaderError::Status {
                status: 404,
                message: format!("domain {domain} not found"),
            });
        }
        let mut records = seeded_records(section, domain);
        if let Some(extra) = self.created.read().await.get(&(domain.clone(), section)) {
            records.extend(extra.iter().cloned());
        }
        Ok(records)
    }
}

impl FormBackend for DemoBackend {
    fn create_handler(&self, section: SectionId, domain: DomainId) -> Arc<dyn SubmitHandler> {
        Arc::new(DemoCreateHandler {
            created: Arc::clone(&self.created),
            section,
            domain,
        })
    }
}

struct DemoCreateHandler {
    created: Created,
    section: SectionId,
    domain: DomainId,
}

#[async_trait::async_trait]
impl SubmitHandler for DemoCreateHandler {
    async fn submit(&self, values: FormValues) -> Result<SubmitOutcome, SubmitError> {
        values.validate()?;
        let mut created = self.created.write().await;
        let list = created
            .entry((self.domain.clone(), self.section))
            .or_default();
        let id = format!("{}-new-{}", self.section.as_str(), list.len() + 1);
        let mut record = Record::new(id.clone());
        if let serde_json::Value::Object(map) = values.to_json() {
            record.fields.extend(map);
        }
        list.push(record);
        debug!(section = %self.section, domain = %self.domain, %id, "demo record created");
        Ok(SubmitOutcome::close_and_refresh()
            .with_message(format!("{} saved", self.section.title())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_records_appear_on_next_load() {
        let backend = DemoBackend::new(Duration::ZERO);
        let domain = DomainId::from("domain1");
        let loader = backend.registry().get(SectionId::Coupons).unwrap();
        let before = loader.load(SectionId::Coupons, &domain).await.unwrap().len();

        let handler = backend.create_handler(SectionId::Coupons, domain.clone());
        let outcome = handler
            .submit(FormValues::from([("code", "AUTUMN"), ("discount", "15")]))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::close_and_refresh().with_message("Coupons saved"));

        let after = loader.load(SectionId::Coupons, &domain).await.unwrap();
        assert_eq!(after.len(), before + 1);
        assert_eq!(after.last().unwrap().text("code").as_deref(), Some("AUTUMN"));
    }

    #[tokio::test]
    async fn mail_has_no_loader_and_unknown_domains_fail() {
        let backend = DemoBackend::new(Duration::ZERO);
        let registry = backend.registry();
        assert!(!registry.contains(SectionId::Mail));

        let loader = registry.get(SectionId::Tours).unwrap();
        let err = loader
            .load(SectionId::Tours, &DomainId::from("elsewhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoaderError::Status { status: 404, .. }));
    }
}
