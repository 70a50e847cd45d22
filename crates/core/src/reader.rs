//! Paginated, filterable read access to a user's notifications.
//!
//! The reader is stateless apart from its store handle and pagination
//! bounds, so it is cheap to clone and safe to share across tasks. It does
//! no locking: under concurrent writes the total count and the returned
//! window may reflect slightly different instants.

use crate::error::CoreError;
use crate::notification::Notification;
use crate::pagination::{PageRequest, PaginatedResult, PaginationConfig};
use crate::store::{DynNotificationStore, NotificationFilter};
use crate::types::DbId;

/// Resolve the caller's identity into a user id.
///
/// A missing or non-positive id is rejected; ids are BIGSERIAL keys.
pub fn resolve_user(user_id: Option<DbId>) -> Result<DbId, CoreError> {
    match user_id {
        Some(id) if id > 0 => Ok(id),
        Some(id) => Err(CoreError::Unauthorized(format!("invalid user identity {id}"))),
        None => Err(CoreError::Unauthorized("missing user identity".into())),
    }
}

#[derive(Clone)]
pub struct PaginatedNotificationReader {
    store: DynNotificationStore,
    config: PaginationConfig,
}

impl PaginatedNotificationReader {
    pub fn new(store: DynNotificationStore, config: PaginationConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Fetch one page of the user's notifications from raw pagination input.
    ///
    /// `page < 1` becomes 1; `page_size` is clamped into `[1, max]` with
    /// non-positive sizes falling back to the default.
    pub async fn fetch(
        &self,
        user_id: Option<DbId>,
        page: i64,
        page_size: i64,
        unread_only: bool,
    ) -> Result<PaginatedResult<Notification>, CoreError> {
        let request = PageRequest::normalize(Some(page), Some(page_size), unread_only, &self.config);
        self.fetch_page(user_id, request).await
    }

    /// Fetch one page for an already-normalized request.
    ///
    /// A page past the end is not an error: it comes back empty with the
    /// real total count.
    pub async fn fetch_page(
        &self,
        user_id: Option<DbId>,
        request: PageRequest,
    ) -> Result<PaginatedResult<Notification>, CoreError> {
        let user_id = resolve_user(user_id)?;
        let filter = NotificationFilter {
            user_id,
            unread_only: request.unread_only(),
        };

        let slice = self
            .store
            .query_notifications(filter, request.offset(), request.page_size())
            .await?;

        tracing::debug!(
            user_id,
            page = request.page(),
            page_size = request.page_size(),
            unread_only = request.unread_only(),
            total_count = slice.total_count,
            returned = slice.items.len(),
            "Fetched notification page"
        );

        Ok(PaginatedResult::new(slice.items, slice.total_count, &request))
    }

    /// Number of unread notifications for the user.
    pub async fn unread_count(&self, user_id: Option<DbId>) -> Result<i64, CoreError> {
        let user_id = resolve_user(user_id)?;
        Ok(self.store.unread_count(user_id).await?)
    }

    /// Mark a single notification as read.
    ///
    /// Fails with `NotFound` if the notification does not exist, belongs to
    /// someone else, or was already read.
    pub async fn mark_read(
        &self,
        user_id: Option<DbId>,
        notification_id: DbId,
    ) -> Result<(), CoreError> {
        let user_id = resolve_user(user_id)?;
        if !self.store.mark_read(user_id, notification_id).await? {
            return Err(CoreError::NotFound {
                entity: "Notification",
                id: notification_id,
            });
        }
        tracing::debug!(user_id, notification_id, "Marked notification read");
        Ok(())
    }

    /// Mark every unread notification of the user as read.
    pub async fn mark_all_read(&self, user_id: Option<DbId>) -> Result<u64, CoreError> {
        let user_id = resolve_user(user_id)?;
        let marked = self.store.mark_all_read(user_id).await?;
        tracing::debug!(user_id, marked, "Marked all notifications read");
        Ok(marked)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
