//! REST collaborators for the admin API
//!
//! - `GET  {base}/domains`
//! - `GET  {base}/domains/{domain}/{section}`
//! - `POST {base}/domains/{domain}/{section}`

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::controller::modal::{FormValues, SubmitHandler, SubmitOutcome};
use crate::controller::registry::{DomainSource, LoaderRegistry, SectionLoader};
use crate::core::{DomainDescriptor, DomainId, LoaderError, RecordList, SectionId, SubmitError};
use crate::modules::forms::FormBackend;

/// Shared HTTP client carrying the base URL and the bearer token
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// Collection payloads arrive bare or wrapped in `data`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Envelope<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Envelope::Bare(items) | Envelope::Wrapped { data: items } => items,
        }
    }
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn section_url(&self, domain: &DomainId, section: SectionId) -> String {
        format!("{}/domains/{}/{}", self.base_url, domain, section.as_str())
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, LoaderError> {
        debug!(url, "GET");
        let response = self.authorized(self.http.get(url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LoaderError::Status {
                status: status.as_u16(),
                message: first_line(&message),
            });
        }
        let body = response.bytes().await?;
        let envelope: Envelope<T> =
            serde_json::from_slice(&body).map_err(|err| LoaderError::Decode(err.to_string()))?;
        Ok(envelope.into_items())
    }

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<(), SubmitError> {
        debug!(url, "POST");
        let response = self
            .authorized(self.http.post(url))
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SubmitError::Rejected(format!(
                "{}: {}",
                status.as_u16(),
                first_line(&message)
            )));
        }
        Ok(())
    }
}

fn first_line(message: &str) -> String {
    let line = message.lines().next().unwrap_or_default().trim();
    if line.is_empty() {
        "no details".to_string()
    } else {
        line.chars().take(160).collect()
    }
}

/// One loader serving every section from `{base}/domains/{domain}/{section}`
pub struct RestSectionLoader {
    client: ApiClient,
}

impl RestSectionLoader {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl SectionLoader for RestSectionLoader {
    async fn load(&self, section: SectionId, domain: &DomainId) -> Result<RecordList, LoaderError> {
        let url = self.client.section_url(domain, section);
        self.client.get_list(&url).await
    }
}

pub struct RestDomainSource {
    client: ApiClient,
}

impl RestDomainSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl DomainSource for RestDomainSource {
    async fn domains(&self) -> Result<Vec<DomainDescriptor>, LoaderError> {
        let url = format!("{}/domains", self.client.base_url());
        self.client.get_list(&url).await
    }
}

/// Registry with the REST loader for every section
pub fn registry(client: &ApiClient) -> LoaderRegistry {
    let loader: Arc<dyn SectionLoader> = Arc::new(RestSectionLoader::new(client.clone()));
    let mut registry = LoaderRegistry::new();
    registry.register_many(SectionId::ALL, loader);
    registry
}

pub struct RestFormBackend {
    client: ApiClient,
}

impl RestFormBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl FormBackend for RestFormBackend {
    fn create_handler(&self, section: SectionId, domain: DomainId) -> Arc<dyn SubmitHandler> {
        Arc::new(RestCreateHandler {
            client: self.client.clone(),
            section,
            domain,
        })
    }
}

/// Saves one create form with `POST`
struct RestCreateHandler {
    client: ApiClient,
    section: SectionId,
    domain: DomainId,
}

#[async_trait::async_trait]
impl SubmitHandler for RestCreateHandler {
    async fn submit(&self, values: FormValues) -> Result<SubmitOutcome, SubmitError> {
        values.validate()?;
        let url = self.client.section_url(&self.domain, self.section);
        self.client.post_json(&url, &values.to_json()).await?;
        info!(section = %self.section, domain = %self.domain, "record created");
        Ok(SubmitOutcome::close_and_refresh()
            .with_message(format!("{} saved", self.section.title())))
    }
}
