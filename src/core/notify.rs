//! Notification side-channel (toast-style status messages)

use tokio::sync::mpsc::UnboundedSender;

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotifyLevel,
}

/// Fire-and-forget sink for user-facing messages. Must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, level: NotifyLevel);
}

/// Notifier backed by an unbounded channel drained by the UI loop
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new(tx: UnboundedSender<Notification>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str, level: NotifyLevel) {
        // receiver gone means the UI is shutting down
        let _ = self.tx.send(Notification {
            message: message.to_string(),
            level,
        });
    }
}
