//! Async jobs - run on the Tokio runtime and resolve to completions

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tracing::debug;

use crate::controller::modal::{FormValues, ModalId, SubmitHandler};
use crate::controller::registry::{DomainSource, SectionLoader};
use crate::core::{DomainId, LoaderError, SectionId, SubmitError};
use crate::infrastructure::runtime::bridge::{Completion, SectionCompletion, SubmitCompletion};

/// Run one section load under `timeout`
pub async fn load_section(
    loader: Arc<dyn SectionLoader>,
    section: SectionId,
    domain: DomainId,
    generation: u64,
    timeout: Duration,
) -> Completion {
    let started = Instant::now();
    let call = AssertUnwindSafe(loader.load(section, &domain)).catch_unwind();
    let result = match tokio::time::timeout(timeout, call).await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(LoaderError::Failed(format!("{section} loader panicked"))),
        Err(_) => Err(LoaderError::Timeout(timeout)),
    };
    debug!(
        %section,
        %domain,
        generation,
        ok = result.is_ok(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "section load finished"
    );
    Completion::Section(SectionCompletion {
        section,
        domain,
        generation,
        result,
    })
}

pub async fn load_domains(source: Arc<dyn DomainSource>, timeout: Duration) -> Completion {
    let call = AssertUnwindSafe(source.domains()).catch_unwind();
    let result = match tokio::time::timeout(timeout, call).await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(LoaderError::Failed("domain source panicked".to_string())),
        Err(_) => Err(LoaderError::Timeout(timeout)),
    };
    Completion::Domains(result)
}

pub async fn run_submit(
    handler: Arc<dyn SubmitHandler>,
    modal: ModalId,
    values: FormValues,
) -> Completion {
    let result = match AssertUnwindSafe(handler.submit(values)).catch_unwind().await {
        Ok(result) => result,
        Err(_) => Err(SubmitError::Backend(anyhow::anyhow!("submit handler panicked"))),
    };
    Completion::Submit(SubmitCompletion { modal, result })
}
