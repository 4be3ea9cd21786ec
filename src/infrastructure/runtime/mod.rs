//! Runtime infrastructure - Tokio runtime bridge for async operations

mod bridge;
pub mod worker;

pub use bridge::{Completion, Dispatcher, RuntimeBridge, SectionCompletion, SubmitCompletion};
