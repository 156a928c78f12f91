//! Notifier implementations.

use std::sync::Mutex;

use thesis_core::notify::{Notification, Notifier, NotifyError};

/// Writes notifications to the tracing log. The default for the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            kind = ?notification.kind,
            audience = ?notification.audience,
            link = notification.link.as_deref().unwrap_or(""),
            "notify: {}",
            notification.title
        );
        Ok(())
    }
}

/// Keeps every notification in memory. Can be told to fail every delivery.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every delivery fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Notifications delivered so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError("recording notifier set to fail".into()));
        }
        self.sent
            .lock()
            .map_err(|e| NotifyError(e.to_string()))?
            .push(notification.clone());
        Ok(())
    }
}
