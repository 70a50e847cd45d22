//! Notification row model.

use notifeed_core::notification::Notification;
use notifeed_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationRow {
    pub id: DbId,
    pub user_id: DbId,
    pub event_id: Option<DbId>,
    pub title: String,
    pub body: Option<String>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Notification {
            id: row.id,
            user_id: row.user_id,
            event_id: row.event_id,
            title: row.title,
            body: row.body,
            is_read: row.is_read,
            read_at: row.read_at,
            created_at: row.created_at,
        }
    }
}
