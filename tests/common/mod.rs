#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use tourdesk::controller::{
    DashboardController, DashboardSettings, DomainSource, LoadOutcome, LoaderRegistry, Renderer,
    SectionLoader,
};
use tourdesk::core::{
    DomainDescriptor, DomainId, LoaderError, Notifier, NotifyLevel, Record, RecordList, SectionId,
};
use tourdesk::infrastructure::runtime::{Completion, Dispatcher};

#[derive(Default)]
pub struct RecordingRenderer {
    pub renders: Vec<(SectionId, RecordList)>,
}

impl RecordingRenderer {
    pub fn last_ids(&self) -> Vec<String> {
        self.renders
            .last()
            .map(|(_, records)| records.iter().map(|r| r.id.clone()).collect())
            .unwrap_or_default()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, section: SectionId, records: &RecordList) {
        self.renders.push((section, records.clone()));
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, NotifyLevel)>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<(String, NotifyLevel)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn at(&self, level: NotifyLevel) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|(_, l)| *l == level)
            .map(|(m, _)| m)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, level: NotifyLevel) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), level));
    }
}

/// Loader answering `"{section}@{domain}#{call}"` after a scripted delay
#[derive(Default)]
pub struct FakeLoader {
    delays: Mutex<BTreeMap<SectionId, VecDeque<Duration>>>,
    calls: Mutex<Vec<(SectionId, DomainId)>>,
    counter: AtomicUsize,
    fail: Mutex<BTreeMap<SectionId, String>>,
    panic_on: Mutex<Option<SectionId>>,
}

impl FakeLoader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn delay_next(&self, section: SectionId, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .entry(section)
            .or_default()
            .push_back(delay);
    }

    pub fn fail_with(&self, section: SectionId, message: &str) {
        self.fail.lock().unwrap().insert(section, message.to_string());
    }

    pub fn panic_on(&self, section: SectionId) {
        *self.panic_on.lock().unwrap() = Some(section);
    }

    pub fn calls(&self) -> Vec<(SectionId, DomainId)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, section: SectionId) -> Vec<DomainId> {
        self.calls()
            .into_iter()
            .filter(|(s, _)| *s == section)
            .map(|(_, d)| d)
            .collect()
    }
}

#[async_trait::async_trait]
impl SectionLoader for FakeLoader {
    async fn load(&self, section: SectionId, domain: &DomainId) -> Result<RecordList, LoaderError> {
        let call = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.calls.lock().unwrap().push((section, domain.clone()));
        let delay = self
            .delays
            .lock()
            .unwrap()
            .get_mut(&section)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Duration::from_millis(10));
        tokio::time::sleep(delay).await;

        if *self.panic_on.lock().unwrap() == Some(section) {
            panic!("loader exploded");
        }
        if let Some(message) = self.fail.lock().unwrap().get(&section) {
            return Err(LoaderError::Failed(message.clone()));
        }
        Ok(vec![Record::new(format!("{section}@{domain}#{call}"))
            .with("bookings", call as u64)])
    }
}

pub struct FakeDomains {
    pub domains: Vec<DomainDescriptor>,
    pub delay: Duration,
}

impl FakeDomains {
    pub fn two() -> Arc<Self> {
        Arc::new(Self {
            domains: vec![
                DomainDescriptor::new("domain1", "Lisbon"),
                DomainDescriptor::new("domain2", "Porto"),
            ],
            delay: Duration::from_millis(20),
        })
    }
}

#[async_trait::async_trait]
impl DomainSource for FakeDomains {
    async fn domains(&self) -> Result<Vec<DomainDescriptor>, LoaderError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.domains.clone())
    }
}

pub fn registry_without(loader: &Arc<FakeLoader>, missing: &[SectionId]) -> LoaderRegistry {
    let shared: Arc<dyn SectionLoader> = loader.clone();
    let mut registry = LoaderRegistry::new();
    registry.register_many(
        SectionId::ALL
            .into_iter()
            .filter(|section| !missing.contains(section)),
        shared,
    );
    registry
}

pub struct Harness {
    pub ctl: DashboardController<RecordingRenderer>,
    pub rx: UnboundedReceiver<Completion>,
    pub notes: Arc<RecordingNotifier>,
    pub loader: Arc<FakeLoader>,
    pub outcomes: Vec<(SectionId, LoadOutcome)>,
}

impl Harness {
    /// Must run inside a Tokio runtime
    pub fn new(missing: &[SectionId], settings: DashboardSettings) -> Self {
        let loader = FakeLoader::new();
        let notes = Arc::new(RecordingNotifier::default());
        let (dispatcher, rx) = Dispatcher::current();
        let ctl = DashboardController::new(
            registry_without(&loader, missing),
            FakeDomains::two(),
            RecordingRenderer::default(),
            notes.clone(),
            dispatcher,
            settings,
        );
        Self {
            ctl,
            rx,
            notes,
            loader,
            outcomes: Vec::new(),
        }
    }

    /// Let `elapsed` of (paused) time pass, then apply everything that finished
    pub async fn run_for(&mut self, elapsed: Duration) {
        tokio::time::sleep(elapsed).await;
        while let Ok(completion) = self.rx.try_recv() {
            match completion {
                Completion::Domains(result) => self.ctl.apply_domains(result),
                Completion::Section(section) => {
                    let id = section.section;
                    let outcome = self.ctl.apply_section(section);
                    self.outcomes.push((id, outcome));
                }
                Completion::VisualsReady => self.ctl.apply_visuals_ready(),
                Completion::Submit(_) => {}
            }
        }
    }

    /// Startup sequence through the first dashboard render
    pub async fn started(missing: &[SectionId]) -> Self {
        let mut harness = Self::new(missing, DashboardSettings::default());
        harness.ctl.load_initial_data();
        harness.run_for(Duration::from_millis(50)).await;
        harness.run_for(Duration::from_millis(200)).await;
        harness
    }
}
