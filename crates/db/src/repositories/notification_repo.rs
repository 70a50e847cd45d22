//! Repository for the `notifications` table.

use notifeed_core::notification::NewNotification;
use notifeed_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::NotificationRow;

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, user_id, event_id, title, body, is_read, read_at, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification for a user, returning the inserted row.
    pub async fn create(
        pool: &PgPool,
        input: &NewNotification,
    ) -> Result<NotificationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, event_id, title, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationRow>(&query)
            .bind(input.user_id)
            .bind(input.event_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// List one window of a user's notifications, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with `is_read = false`
    /// are returned. Ties on `created_at` are broken by `id DESC`.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NotificationRow>, sqlx::Error> {
        let filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 {filter} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, NotificationRow>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a user's notifications under the same filter as [`Self::list_for_user`].
    pub async fn count_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
    ) -> Result<i64, sqlx::Error> {
        let filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!("SELECT COUNT(*) FROM notifications WHERE user_id = $1 {filter}");
        let count: Option<i64> = sqlx::query_scalar(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification was found for the given user and updated,
    /// `false` otherwise.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND is_read = false",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read for a user.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Get the number of unread notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        Self::count_for_user(pool, user_id, true).await
    }
}
