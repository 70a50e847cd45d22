//! Storage collaborator boundary.
//!
//! The reader only talks to storage through [`NotificationStore`]. The
//! PostgreSQL implementation lives in `notifeed-db`; [`memory`] holds an
//! in-process implementation used by tests and local tooling.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::notification::Notification;
use crate::types::DbId;

pub use memory::InMemoryNotificationStore;

/// Failure reported by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => CoreError::StorageUnavailable(msg),
        }
    }
}

/// Which notifications a query matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationFilter {
    pub user_id: DbId,
    pub unread_only: bool,
}

impl NotificationFilter {
    pub fn matches(&self, notification: &Notification) -> bool {
        notification.user_id == self.user_id && (!self.unread_only || !notification.is_read)
    }
}

/// A window of matching notifications plus the count of all matches.
#[derive(Debug, Clone, Default)]
pub struct NotificationSlice {
    pub items: Vec<Notification>,
    pub total_count: i64,
}

/// Notification storage operations.
///
/// Every listing is ordered by `created_at DESC, id DESC`.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Return the `[offset, offset + limit)` window of matching notifications
    /// and the total number of matches, independent of the window.
    async fn query_notifications(
        &self,
        filter: NotificationFilter,
        offset: i64,
        limit: i64,
    ) -> Result<NotificationSlice, StoreError>;

    /// Count the user's unread notifications.
    async fn unread_count(&self, user_id: DbId) -> Result<i64, StoreError>;

    /// Mark one unread notification owned by `user_id` as read.
    ///
    /// Returns `false` when nothing matched (missing, foreign, or already read).
    async fn mark_read(&self, user_id: DbId, notification_id: DbId) -> Result<bool, StoreError>;

    /// Mark all of the user's unread notifications as read, returning how many changed.
    async fn mark_all_read(&self, user_id: DbId) -> Result<u64, StoreError>;
}

pub type DynNotificationStore = Arc<dyn NotificationStore>;
