//! Feature modules driven by the app
//!
//! - forms: create-form templates, detail views, save handler factory
//! - export: CSV/JSON export of the active section

pub mod export;
pub mod forms;
