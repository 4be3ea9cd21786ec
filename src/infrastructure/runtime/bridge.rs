//! Runtime bridge - connects the sync TUI thread with the async Tokio runtime
//!
//! Controllers hand futures to a [`Dispatcher`]; each future resolves to a
//! [`Completion`] that travels back over a channel and is applied on the UI
//! thread. Nothing spawned here touches UI state directly.

use std::future::Future;
use std::time::Duration;

use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::controller::modal::{ModalId, SubmitOutcome};
use crate::core::{DomainDescriptor, DomainId, LoaderError, RecordList, SectionId, SubmitError};

/// Results sent from async tasks back to the UI thread
#[derive(Debug)]
pub enum Completion {
    /// Domain list finished loading
    Domains(Result<Vec<DomainDescriptor>, LoaderError>),
    /// A section load finished
    Section(SectionCompletion),
    /// A modal submit handler finished
    Submit(SubmitCompletion),
    /// Layout settle delay elapsed; deferred visuals may draw
    VisualsReady,
}

#[derive(Debug)]
pub struct SectionCompletion {
    pub section: SectionId,
    pub domain: DomainId,
    pub generation: u64,
    pub result: Result<RecordList, LoaderError>,
}

#[derive(Debug)]
pub struct SubmitCompletion {
    pub modal: ModalId,
    pub result: Result<SubmitOutcome, SubmitError>,
}

/// Spawns futures and forwards their completions
#[derive(Debug, Clone)]
pub struct Dispatcher {
    handle: Handle,
    tx: UnboundedSender<Completion>,
}

impl Dispatcher {
    pub fn new(handle: Handle, tx: UnboundedSender<Completion>) -> Self {
        Self { handle, tx }
    }

    /// Dispatcher on the current runtime plus the receiving end
    pub fn current() -> (Self, UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(Handle::current(), tx), rx)
    }

    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let _ = tx.send(task.await);
        });
    }

    /// Deliver `completion` after `delay`
    pub fn schedule(&self, delay: Duration, completion: Completion) {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            completion
        });
    }
}

/// Owns the Tokio runtime used by the TUI
pub struct RuntimeBridge {
    runtime: Option<Runtime>,
    dispatcher: Dispatcher,
    completions: UnboundedReceiver<Completion>,
}

impl RuntimeBridge {
    pub fn new() -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("tourdesk-worker")
            .enable_all()
            .build()
            .map_err(|err| anyhow::anyhow!("Failed to create Tokio runtime: {err}"))?;
        let (tx, completions) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(runtime.handle().clone(), tx);
        Ok(Self {
            runtime: Some(runtime),
            dispatcher,
            completions,
        })
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Poll for completions (non-blocking)
    pub fn poll_completions(&mut self) -> Vec<Completion> {
        let mut out = Vec::new();
        while let Ok(completion) = self.completions.try_recv() {
            out.push(completion);
        }
        out
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
