//! Error taxonomy of the controller core

use std::time::Duration;

use thiserror::Error;

/// Rejected navigation requests. Recovered locally, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("unknown section: {0}")]
    InvalidSection(String),

    #[error("unknown domain: {0}")]
    UnknownDomain(String),
}

/// A section loader or domain source failed.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("load timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected payload: {0}")]
    Decode(String),

    #[error("{0}")]
    Failed(String),
}

/// A modal submit handler failed. The modal stays open.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("missing required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("rejected by server: {0}")]
    Rejected(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
