//! Notification sink: fire-and-forget writes to a notifications store.
//!
//! Failures are logged and swallowed; a notification must never roll back or
//! fail the primary update it accompanies.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use staffhq_core::UserId;

/// One notification record for a principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub user_id: UserId,
    /// Severity/category tag, e.g. "info".
    pub kind: String,
    pub message: String,
    /// What the notification refers to, e.g. "role_change".
    pub reference_type: String,
}

impl Notification {
    pub fn info(user_id: UserId, message: impl Into<String>, reference_type: impl Into<String>) -> Self {
        Self {
            user_id,
            kind: "info".to_string(),
            message: message.into(),
            reference_type: reference_type.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("notification store unavailable: {0}")]
    Unavailable(String),
}

pub trait NotificationSink: Send + Sync {
    fn enqueue(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Enqueue, logging instead of propagating on failure.
pub fn enqueue_best_effort(sink: &dyn NotificationSink, notification: Notification) {
    let user_id = notification.user_id;
    if let Err(err) = sink.enqueue(notification) {
        tracing::warn!(%user_id, error = %err, "failed to enqueue notification");
    }
}

/// In-memory sink for tests and the default server wiring.
#[derive(Debug, Default)]
pub struct InMemoryNotificationSink {
    inner: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn for_user(&self, user_id: UserId) -> Vec<Notification> {
        self.all()
            .into_iter()
            .filter(|n| n.user_id == user_id)
            .collect()
    }
}

impl NotificationSink for InMemoryNotificationSink {
    fn enqueue(&self, notification: Notification) -> Result<(), NotifyError> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    impl NotificationSink for FailingSink {
        fn enqueue(&self, _notification: Notification) -> Result<(), NotifyError> {
            Err(NotifyError::Unavailable("down for maintenance".into()))
        }
    }

    #[test]
    fn best_effort_swallows_sink_failures() {
        // Must not panic or propagate.
        enqueue_best_effort(
            &FailingSink,
            Notification::info(UserId::new(), "hello", "test"),
        );
    }

    #[test]
    fn in_memory_sink_records_per_user() {
        let sink = InMemoryNotificationSink::new();
        let user = UserId::new();
        sink.enqueue(Notification::info(user, "one", "test")).unwrap();
        sink.enqueue(Notification::info(UserId::new(), "two", "test")).unwrap();

        assert_eq!(sink.all().len(), 2);
        assert_eq!(sink.for_user(user).len(), 1);
    }
}
