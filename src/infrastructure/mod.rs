//! Infrastructure layer - external collaborators
//!
//! - api: REST loaders and save handlers (reqwest)
//! - demo: deterministic offline data
//! - runtime: Tokio runtime bridge for async operations

pub mod api;
pub mod demo;
pub mod runtime;
