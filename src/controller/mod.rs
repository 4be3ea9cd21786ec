//! Navigation and modal workflow engine
//!
//! - dashboard: active section/domain, loader dispatch, stale-load discard
//! - modal: single open modal, form editing, handler-driven submit
//! - registry: loader contracts and the section dispatch table

pub mod dashboard;
pub mod modal;
pub mod registry;

pub use dashboard::{DashboardController, DashboardSettings, LoadOutcome, NavigationState, Renderer};
pub use modal::{
    handler_fn, DetailView, Disposition, FieldKind, Form, FormField, FormValues, ModalContent,
    ModalController, ModalId, ModalState, SubmitHandler, SubmitOutcome, SubmitResolution,
};
pub use registry::{DomainSource, LoaderRegistry, SectionLoader};
