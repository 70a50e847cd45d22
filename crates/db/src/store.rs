//! [`NotificationStore`] backed by PostgreSQL.
//!
//! The count and the window are two separate statements outside a
//! transaction, so under concurrent writes they may disagree slightly.

use async_trait::async_trait;
use notifeed_core::notification::Notification;
use notifeed_core::store::{NotificationFilter, NotificationSlice, NotificationStore, StoreError};
use notifeed_core::types::DbId;

use crate::repositories::NotificationRepo;
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgNotificationStore {
    pool: DbPool,
}

impl PgNotificationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn unavailable(err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, "Notification store query failed");
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn query_notifications(
        &self,
        filter: NotificationFilter,
        offset: i64,
        limit: i64,
    ) -> Result<NotificationSlice, StoreError> {
        let total_count =
            NotificationRepo::count_for_user(&self.pool, filter.user_id, filter.unread_only)
                .await
                .map_err(unavailable)?;

        // Nothing can match past the end; skip the second round trip.
        if offset >= total_count {
            return Ok(NotificationSlice {
                items: Vec::new(),
                total_count,
            });
        }

        let rows = NotificationRepo::list_for_user(
            &self.pool,
            filter.user_id,
            filter.unread_only,
            limit,
            offset,
        )
        .await
        .map_err(unavailable)?;

        Ok(NotificationSlice {
            items: rows.into_iter().map(Notification::from).collect(),
            total_count,
        })
    }

    async fn unread_count(&self, user_id: DbId) -> Result<i64, StoreError> {
        NotificationRepo::unread_count(&self.pool, user_id)
            .await
            .map_err(unavailable)
    }

    async fn mark_read(&self, user_id: DbId, notification_id: DbId) -> Result<bool, StoreError> {
        NotificationRepo::mark_read(&self.pool, notification_id, user_id)
            .await
            .map_err(unavailable)
    }

    async fn mark_all_read(&self, user_id: DbId) -> Result<u64, StoreError> {
        NotificationRepo::mark_all_read(&self.pool, user_id)
            .await
            .map_err(unavailable)
    }
}
