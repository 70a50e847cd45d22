//! Notification domain model.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Read state of a notification. Only ever moves from `Unread` to `Read`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Unread,
    Read,
}

/// A notification owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub event_id: Option<DbId>,
    pub title: String,
    pub body: Option<String>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Notification {
    pub fn status(&self) -> NotificationStatus {
        if self.is_read {
            NotificationStatus::Read
        } else {
            NotificationStatus::Unread
        }
    }
}

/// DTO for creating a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNotification {
    pub user_id: DbId,
    pub event_id: Option<DbId>,
    pub title: String,
    pub body: Option<String>,
}

impl NewNotification {
    pub fn new(user_id: DbId, title: impl Into<String>) -> Self {
        Self {
            user_id,
            event_id: None,
            title: title.into(),
            body: None,
        }
    }
}
