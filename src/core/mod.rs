pub mod action;
pub mod command;
pub mod domain;
pub mod error;
pub mod notify;
pub mod record;
pub mod section;
pub mod tabs;

pub use action::{Action, ExportFormat, NavigateTarget};
pub use command::{parse_command, Command};
pub use domain::{DomainDescriptor, DomainId};
pub use error::{LoaderError, NavigationError, SubmitError};
pub use notify::{ChannelNotifier, Notification, Notifier, NotifyLevel};
pub use record::{Record, RecordList};
pub use section::SectionId;
pub use tabs::{DetailTab, TabGroup, TabId};
