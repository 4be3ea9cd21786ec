//! Actions that commands and key handlers return to the app

use super::NotifyLevel;

/// Actions describing a state change the app should apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Navigate somewhere
    Navigate(NavigateTarget),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Open the create form of the active section
    OpenCreateForm,

    /// Open the detail view of the selected record
    OpenDetail,

    /// Reload the active section
    Refresh,

    /// Export the rendered records of the active section
    Export(ExportFormat),

    /// Toggle the help overlay
    ToggleHelp,

    /// Close current overlay/modal
    CloseOverlay,

    /// Request quit
    Quit,
}

/// Navigation targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigateTarget {
    /// Section by name, validated by the dashboard controller
    Section(String),
    NextSection,
    PrevSection,
    /// Domain by id, validated against the loaded domain list
    Domain(String),
    NextDomain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}
