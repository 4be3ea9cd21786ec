//! Tourdesk - terminal admin dashboard for a tour-booking platform
//!
//! The controller layer tracks the current section and domain, dispatches
//! section loaders and drives modal workflows. Everything else is a
//! collaborator wired in `main`.

pub mod app;
pub mod config;
pub mod controller;
pub mod core;
pub mod infrastructure;
pub mod logging;
pub mod modules;
pub mod store;
pub mod ui;
