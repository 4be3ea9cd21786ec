//! Dashboard controller - single source of truth for what is shown
//!
//! Every section load is stamped with a per-section generation. A
//! completion is rendered only when it matches the latest generation of the
//! section that is current at arrival time, so a slow response can never
//! overwrite a newer view.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::controller::registry::{DomainSource, LoaderRegistry};
use crate::core::{
    DomainDescriptor, DomainId, LoaderError, NavigationError, Notifier, NotifyLevel, RecordList,
    SectionId,
};
use crate::infrastructure::runtime::{worker, Completion, Dispatcher, SectionCompletion};

/// Receives the records of the section being shown
pub trait Renderer {
    fn render(&mut self, section: SectionId, records: &RecordList);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub current_section: SectionId,
    pub current_domain: Option<DomainId>,
}

#[derive(Debug, Clone, Copy)]
pub struct DashboardSettings {
    /// Upper bound for one loader call
    pub load_timeout: Duration,
    /// Delay before deferred visuals (charts) are signalled ready
    pub visuals_settle: Duration,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            load_timeout: Duration::from_secs(8),
            visuals_settle: Duration::from_millis(100),
        }
    }
}

/// What happened to an applied section completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered,
    Failed,
    Stale,
}

pub struct DashboardController<R: Renderer> {
    nav: NavigationState,
    highlighted: SectionId,
    domains: Vec<DomainDescriptor>,
    generations: [u64; SectionId::COUNT],
    inflight: [bool; SectionId::COUNT],
    registry: LoaderRegistry,
    domain_source: Arc<dyn DomainSource>,
    renderer: R,
    notifier: Arc<dyn Notifier>,
    dispatcher: Dispatcher,
    settings: DashboardSettings,
    visuals_ready: bool,
}

impl<R: Renderer> DashboardController<R> {
    pub fn new(
        registry: LoaderRegistry,
        domain_source: Arc<dyn DomainSource>,
        renderer: R,
        notifier: Arc<dyn Notifier>,
        dispatcher: Dispatcher,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            nav: NavigationState {
                current_section: SectionId::Dashboard,
                current_domain: None,
            },
            highlighted: SectionId::Dashboard,
            domains: Vec::new(),
            generations: [0; SectionId::COUNT],
            inflight: [false; SectionId::COUNT],
            registry,
            domain_source,
            renderer,
            notifier,
            dispatcher,
            settings,
            visuals_ready: false,
        }
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn current_section(&self) -> SectionId {
        self.nav.current_section
    }

    pub fn current_domain(&self) -> Option<&DomainId> {
        self.nav.current_domain.as_ref()
    }

    /// Section marked active in the sidebar
    pub fn highlighted(&self) -> SectionId {
        self.highlighted
    }

    pub fn domains(&self) -> &[DomainDescriptor] {
        &self.domains
    }

    pub fn current_domain_descriptor(&self) -> Option<&DomainDescriptor> {
        let current = self.nav.current_domain.as_ref()?;
        self.domains.iter().find(|domain| &domain.id == current)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn visuals_ready(&self) -> bool {
        self.visuals_ready
    }

    /// Latest load of the current section has not completed yet
    pub fn is_loading(&self) -> bool {
        self.inflight[self.nav.current_section.index()]
    }

    /// Start the startup sequence: domains, then the dashboard section.
    /// Continues in [`DashboardController::apply_domains`].
    pub fn load_initial_data(&mut self) {
        info!("loading domain list");
        let source = Arc::clone(&self.domain_source);
        let timeout = self.settings.load_timeout;
        self.dispatcher
            .spawn(async move { worker::load_domains(source, timeout).await });
    }

    /// Adopt the domain list, select its first entry and show the dashboard.
    ///
    /// This always lands on [`SectionId::Dashboard`], so a section picked while
    /// the domain list was still loading is replaced.
    pub fn apply_domains(&mut self, result: Result<Vec<DomainDescriptor>, LoaderError>) {
        match result {
            Ok(domains) => {
                info!(count = domains.len(), "domains loaded");
                self.nav.current_domain = domains.first().map(|domain| domain.id.clone());
                self.domains = domains;
                if self.domains.is_empty() {
                    self.notifier
                        .notify("No domains available for this account", NotifyLevel::Warning);
                }
            }
            Err(err) => {
                warn!(error = %err, "domain list failed");
                self.notifier
                    .notify(&format!("Failed to load domains: {err}"), NotifyLevel::Error);
            }
        }
        self.switch_section(SectionId::Dashboard);
        self.dispatcher
            .schedule(self.settings.visuals_settle, Completion::VisualsReady);
    }

    pub fn apply_visuals_ready(&mut self) {
        debug!("visuals ready");
        self.visuals_ready = true;
    }

    /// Show `section`. Re-selecting the active section reloads it.
    pub fn switch_section(&mut self, section: SectionId) {
        self.nav.current_section = section;
        self.on_section_changed();
    }

    /// String entry point; unknown names leave the state untouched
    pub fn navigate(&mut self, name: &str) -> Result<(), NavigationError> {
        match name.parse::<SectionId>() {
            Ok(section) => {
                self.switch_section(section);
                Ok(())
            }
            Err(err) => {
                warn!(section = name, "ignoring navigation to unknown section");
                Err(err)
            }
        }
    }

    pub fn cycle_section(&mut self, forward: bool) {
        self.switch_section(self.nav.current_section.cycle(forward));
    }

    /// Switch to a loaded domain and reload the current section
    pub fn switch_domain(&mut self, domain: DomainId) -> Result<(), NavigationError> {
        if !self.domains.iter().any(|known| known.id == domain) {
            warn!(%domain, loaded = self.domains.len(), "ignoring switch to unknown domain");
            self.notifier
                .notify(&format!("Unknown domain: {domain}"), NotifyLevel::Warning);
            return Err(NavigationError::UnknownDomain(domain.to_string()));
        }
        info!(%domain, "domain switched");
        self.nav.current_domain = Some(domain);
        self.load_section_data(self.nav.current_section);
        Ok(())
    }

    pub fn cycle_domain(&mut self) {
        if self.domains.is_empty() {
            self.notifier.notify("No domains loaded", NotifyLevel::Warning);
            return;
        }
        let index = self
            .nav
            .current_domain
            .as_ref()
            .and_then(|current| self.domains.iter().position(|d| &d.id == current))
            .map(|pos| (pos + 1) % self.domains.len())
            .unwrap_or(0);
        let next = self.domains[index].id.clone();
        if let Err(err) = self.switch_domain(next) {
            debug!(error = %err, "domain cycle rejected");
        }
    }

    pub fn reload(&mut self) -> bool {
        self.load_section_data(self.nav.current_section)
    }

    /// Dispatch the loader of `section`. Returns whether a load started.
    pub fn load_section_data(&mut self, section: SectionId) -> bool {
        let Some(domain) = self.nav.current_domain.clone() else {
            debug!(%section, "no domain selected yet, skipping load");
            return false;
        };
        let Some(loader) = self.registry.get(section) else {
            warn!(%section, "no loader registered");
            self.notifier.notify(
                &format!("{} is not available yet", section.title()),
                NotifyLevel::Info,
            );
            return false;
        };

        let idx = section.index();
        self.generations[idx] += 1;
        self.inflight[idx] = true;
        let generation = self.generations[idx];
        let timeout = self.settings.load_timeout;
        debug!(%section, %domain, generation, "dispatching section load");
        self.dispatcher.spawn(async move {
            worker::load_section(loader, section, domain, generation, timeout).await
        });
        true
    }

    pub fn apply_section(&mut self, completion: SectionCompletion) -> LoadOutcome {
        let SectionCompletion {
            section,
            domain,
            generation,
            result,
        } = completion;
        let idx = section.index();

        if generation != self.generations[idx] {
            debug!(%section, generation, latest = self.generations[idx], "discarding stale load");
            return LoadOutcome::Stale;
        }
        self.inflight[idx] = false;

        if section != self.nav.current_section
            || self.nav.current_domain.as_ref() != Some(&domain)
        {
            debug!(%section, %domain, "discarding load for a view that is no longer shown");
            return LoadOutcome::Stale;
        }

        match result {
            Ok(records) => {
                debug!(%section, count = records.len(), "rendering section");
                self.renderer.render(section, &records);
                LoadOutcome::Rendered
            }
            Err(err) => {
                warn!(%section, %domain, error = %err, "section load failed");
                self.notifier.notify(
                    &format!("Failed to load {}: {err}", section.title()),
                    NotifyLevel::Error,
                );
                LoadOutcome::Failed
            }
        }
    }

    fn on_section_changed(&mut self) {
        self.highlighted = self.nav.current_section;
        self.load_section_data(self.nav.current_section);
    }
}
