use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info};

use crate::controller::{
    DashboardController, DashboardSettings, DomainSource, LoaderRegistry, ModalContent,
    ModalController, SubmitResolution,
};
use crate::core::{
    Action, ChannelNotifier, Command, DomainId, NavigateTarget, Notification, Notifier,
    NotifyLevel,
};
use crate::infrastructure::runtime::{Completion, Dispatcher};
use crate::modules::export;
use crate::modules::forms::{self, FormBackend};
use crate::ui::TableView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: NotifyLevel,
    pub since: Instant,
}

/// Backend pieces the app is wired with
pub struct Collaborators {
    pub registry: LoaderRegistry,
    pub domain_source: Arc<dyn DomainSource>,
    pub forms: Arc<dyn FormBackend>,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub dashboard: DashboardSettings,
    pub status_ttl: Duration,
    pub export_dir: PathBuf,
    /// Shown in the header: "demo" or the API host
    pub backend_label: String,
    pub token_present: bool,
}

pub struct App {
    pub dashboard: DashboardController<TableView>,
    pub modal: ModalController,
    forms: Arc<dyn FormBackend>,
    notifications: UnboundedReceiver<Notification>,
    pub status: Option<StatusMessage>,
    status_ttl: Duration,
    export_dir: PathBuf,
    pub backend_label: String,
    pub token_present: bool,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub help_open: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        collaborators: Collaborators,
        dispatcher: Dispatcher,
        settings: AppSettings,
    ) -> Self {
        let (tx, notifications) = mpsc::unbounded_channel();
        let notifier: Arc<dyn Notifier> = Arc::new(ChannelNotifier::new(tx));
        let dashboard = DashboardController::new(
            collaborators.registry,
            collaborators.domain_source,
            TableView::new(),
            Arc::clone(&notifier),
            dispatcher.clone(),
            settings.dashboard,
        );
        let modal = ModalController::new(notifier, dispatcher);
        Self {
            dashboard,
            modal,
            forms: collaborators.forms,
            notifications,
            status: None,
            status_ttl: settings.status_ttl,
            export_dir: settings.export_dir,
            backend_label: settings.backend_label,
            token_present: settings.token_present,
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            help_open: false,
            should_quit: false,
        }
    }

    pub fn start(&mut self) {
        info!(backend = %self.backend_label, "starting dashboard");
        self.set_status("Loading domains…", NotifyLevel::Info);
        self.dashboard.load_initial_data();
    }

    /// Apply finished background work, then surface notifications
    pub fn pump(&mut self, completions: impl IntoIterator<Item = Completion>) {
        for completion in completions {
            match completion {
                Completion::Domains(result) => self.dashboard.apply_domains(result),
                Completion::Section(section) => {
                    self.dashboard.apply_section(section);
                }
                Completion::Submit(submit) => {
                    let resolution = self.modal.apply_submit(submit);
                    if resolution == (SubmitResolution::Closed { refresh: true }) {
                        self.dashboard.reload();
                    }
                }
                Completion::VisualsReady => self.dashboard.apply_visuals_ready(),
            }
        }
        while let Ok(notification) = self.notifications.try_recv() {
            self.set_status(notification.message, notification.level);
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: NotifyLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, NotifyLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > self.status_ttl {
                self.status = None;
            }
        }
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        if input.is_empty() {
            self.exit_command();
            return;
        }
        let cmd = crate::core::parse_command(&input);
        let action = self.execute_command(&cmd);
        self.exit_command();
        self.command.last = Some(input);
        self.apply_action(action);
    }

    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Go(name) => Action::Navigate(NavigateTarget::Section(name.clone())),
            Command::Domain(Some(id)) => Action::Navigate(NavigateTarget::Domain(id.clone())),
            Command::Domain(None) => Action::Navigate(NavigateTarget::NextDomain),
            Command::New => Action::OpenCreateForm,
            Command::Refresh => Action::Refresh,
            Command::Export(arg) => match export::parse_format(arg.as_deref()) {
                Some(format) => Action::Export(format),
                None => Action::Notify(
                    format!("Unknown export format: {}", arg.as_deref().unwrap_or_default()),
                    NotifyLevel::Warning,
                ),
            },
            Command::Help => Action::ToggleHelp,
            Command::Quit => Action::Quit,
            Command::Unknown(input) => {
                Action::Notify(format!("Unknown command: {input}"), NotifyLevel::Warning)
            }
        }
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(target) => match target {
                NavigateTarget::Section(name) => {
                    if let Err(err) = self.dashboard.navigate(&name) {
                        self.set_status(err.to_string(), NotifyLevel::Warning);
                    }
                }
                NavigateTarget::NextSection => self.dashboard.cycle_section(true),
                NavigateTarget::PrevSection => self.dashboard.cycle_section(false),
                NavigateTarget::Domain(id) => {
                    if let Err(err) = self.dashboard.switch_domain(DomainId::new(id)) {
                        debug!(error = %err, "domain switch rejected");
                    }
                }
                NavigateTarget::NextDomain => self.dashboard.cycle_domain(),
            },
            Action::Notify(msg, level) => self.set_status(msg, level),
            Action::OpenCreateForm => self.open_create_form(),
            Action::OpenDetail => self.open_detail(),
            Action::Refresh => {
                if self.dashboard.reload() {
                    let title = self.dashboard.current_section().title();
                    self.set_status(format!("Refreshing {title}…"), NotifyLevel::Info);
                }
            }
            Action::Export(format) => {
                let section = self.dashboard.current_section();
                let records = self
                    .dashboard
                    .renderer()
                    .records_for(section)
                    .unwrap_or_default();
                let result = export::export_records(&self.export_dir, section, records, format);
                self.apply_action(result);
            }
            Action::ToggleHelp => self.help_open = !self.help_open,
            Action::CloseOverlay => {
                if self.modal.is_open() {
                    self.modal.close();
                } else {
                    self.help_open = false;
                }
            }
            Action::Quit => self.should_quit = true,
        }
    }

    pub fn open_create_form(&mut self) {
        let section = self.dashboard.current_section();
        let Some(domain) = self.dashboard.current_domain().cloned() else {
            self.set_status("No domain selected", NotifyLevel::Warning);
            return;
        };
        let Some(form) = forms::create_form(section) else {
            self.set_status(
                format!("{} is read-only", section.title()),
                NotifyLevel::Info,
            );
            return;
        };
        let handler = self.forms.create_handler(section, domain);
        self.modal
            .open(forms::create_title(section), ModalContent::Form(form), Some(handler));
    }

    pub fn open_detail(&mut self) {
        let section = self.dashboard.current_section();
        let view = self.dashboard.renderer();
        let record = match view.records_for(section) {
            Some(_) => view.selected_record().cloned(),
            None => None,
        };
        let Some(record) = record else {
            self.set_status("Nothing selected", NotifyLevel::Info);
            return;
        };
        self.modal.open(
            forms::detail_title(section, &record),
            forms::detail_content(section, &record),
            None,
        );
    }

    pub fn move_selection(&mut self, down: bool) {
        let table = self.dashboard.renderer_mut();
        if down {
            table.move_down();
        } else {
            table.move_up();
        }
    }
}
