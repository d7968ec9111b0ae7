//! Transient user notifications (toasts)
//!
//! Pages push notifications into a queue; the browser host drains the queue
//! after every action and displays them. A loading notification is resolved
//! by a later success or error notification carrying the same id, which lets
//! the host replace the spinner toast in place.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at_ms: i64,
}

impl Notification {
    fn new(id: Uuid, level: NotificationLevel, message: &str) -> Self {
        Self {
            id,
            level,
            message: message.to_string(),
            created_at_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Messages shown while an operation is pending and once it settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastMessages {
    pub loading: &'static str,
    pub success: &'static str,
    pub error: &'static str,
}

/// Handle to a loading notification awaiting its outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingToast {
    id: Uuid,
    messages: ToastMessages,
}

impl PendingToast {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// FIFO of notifications not yet shown
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: &str) -> Uuid {
        self.push(NotificationLevel::Success, message)
    }

    pub fn error(&mut self, message: &str) -> Uuid {
        self.push(NotificationLevel::Error, message)
    }

    /// Queue the loading message of a triad
    pub fn begin(&mut self, messages: ToastMessages) -> PendingToast {
        let id = self.push(NotificationLevel::Loading, messages.loading);
        PendingToast { id, messages }
    }

    /// Queue the success or error message of a triad under the loading id
    pub fn resolve(&mut self, toast: PendingToast, succeeded: bool) {
        let (level, message) = if succeeded {
            (NotificationLevel::Success, toast.messages.success)
        } else {
            (NotificationLevel::Error, toast.messages.error)
        };
        self.pending.push(Notification::new(toast.id, level, message));
    }

    /// Take every queued notification, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.pending.iter().map(|n| n.message.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn push(&mut self, level: NotificationLevel, message: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.pending.push(Notification::new(id, level, message));
        id
    }
}
