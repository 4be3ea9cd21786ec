//! Loader contracts and the section → loader registration table

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::{DomainDescriptor, DomainId, LoaderError, RecordList, SectionId};

/// Fetches the records of one section for one domain
#[async_trait::async_trait]
pub trait SectionLoader: Send + Sync + 'static {
    async fn load(&self, section: SectionId, domain: &DomainId) -> Result<RecordList, LoaderError>;
}

/// Supplies the list of selectable domains, loaded once at startup
#[async_trait::async_trait]
pub trait DomainSource: Send + Sync + 'static {
    async fn domains(&self) -> Result<Vec<DomainDescriptor>, LoaderError>;
}

/// Typed dispatch table. Sections without an entry are tolerated.
#[derive(Clone, Default)]
pub struct LoaderRegistry {
    loaders: BTreeMap<SectionId, Arc<dyn SectionLoader>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, section: SectionId, loader: Arc<dyn SectionLoader>) -> &mut Self {
        self.loaders.insert(section, loader);
        self
    }

    /// Register one loader for several sections
    pub fn register_many(
        &mut self,
        sections: impl IntoIterator<Item = SectionId>,
        loader: Arc<dyn SectionLoader>,
    ) -> &mut Self {
        for section in sections {
            self.loaders.insert(section, Arc::clone(&loader));
        }
        self
    }

    pub fn get(&self, section: SectionId) -> Option<Arc<dyn SectionLoader>> {
        self.loaders.get(&section).cloned()
    }

    pub fn contains(&self, section: SectionId) -> bool {
        self.loaders.contains_key(&section)
    }

    pub fn sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.loaders.keys().copied()
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("sections", &self.loaders.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    #[async_trait::async_trait]
    impl SectionLoader for Empty {
        async fn load(&self, _: SectionId, _: &DomainId) -> Result<RecordList, LoaderError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn register_many_shares_one_loader() {
        let mut registry = LoaderRegistry::new();
        registry.register_many([SectionId::Tours, SectionId::Cities], Arc::new(Empty));
        assert!(registry.contains(SectionId::Tours));
        assert!(registry.contains(SectionId::Cities));
        assert!(!registry.contains(SectionId::Mail));
        assert_eq!(registry.sections().count(), 2);
    }
}
