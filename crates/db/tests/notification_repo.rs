//! Integration tests for the notification repository and Postgres store.
//!
//! Run against a real database (`DATABASE_URL`):
//! `cargo test -p notifeed-db -- --ignored`

use notifeed_core::notification::NewNotification;
use notifeed_core::store::{NotificationFilter, NotificationStore};
use notifeed_db::repositories::NotificationRepo;
use notifeed_db::PgNotificationStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Insert `count` notifications for `user_id`, returning their ids in insert order.
async fn seed(pool: &PgPool, user_id: i64, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let row = NotificationRepo::create(pool, &NewNotification::new(user_id, format!("n{i}")))
            .await
            .unwrap();
        ids.push(row.id);
    }
    ids
}

fn filter(user_id: i64, unread_only: bool) -> NotificationFilter {
    NotificationFilter {
        user_id,
        unread_only,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn health_check_passes(pool: PgPool) {
    notifeed_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_starts_unread(pool: PgPool) {
    let row = NotificationRepo::create(&pool, &NewNotification::new(1, "hello"))
        .await
        .unwrap();

    assert_eq!(row.user_id, 1);
    assert_eq!(row.title, "hello");
    assert!(!row.is_read);
    assert!(row.read_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn pages_split_25_rows_into_20_and_5(pool: PgPool) {
    seed(&pool, 1, 25).await;
    seed(&pool, 2, 3).await;
    let store = PgNotificationStore::new(pool);

    let first = store.query_notifications(filter(1, false), 0, 20).await.unwrap();
    let second = store.query_notifications(filter(1, false), 20, 20).await.unwrap();
    let beyond = store.query_notifications(filter(1, false), 40, 20).await.unwrap();

    assert_eq!(first.items.len(), 20);
    assert_eq!(second.items.len(), 5);
    assert!(beyond.items.is_empty());
    assert_eq!(first.total_count, 25);
    assert_eq!(second.total_count, 25);
    assert_eq!(beyond.total_count, 25);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn rows_with_equal_timestamps_order_by_id_desc(pool: PgPool) {
    let ids = seed(&pool, 1, 3).await;
    sqlx::query("UPDATE notifications SET created_at = '2024-01-01T00:00:00Z'")
        .execute(&pool)
        .await
        .unwrap();
    let store = PgNotificationStore::new(pool);

    let slice = store.query_notifications(filter(1, false), 0, 10).await.unwrap();
    let returned: Vec<i64> = slice.items.iter().map(|n| n.id).collect();
    let mut expected = ids.clone();
    expected.reverse();

    assert_eq!(returned, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn unread_filter_and_mark_read(pool: PgPool) {
    let ids = seed(&pool, 1, 4).await;
    assert!(NotificationRepo::mark_read(&pool, ids[0], 1).await.unwrap());
    assert!(!NotificationRepo::mark_read(&pool, ids[0], 1).await.unwrap());
    assert!(!NotificationRepo::mark_read(&pool, ids[1], 2).await.unwrap());
    let store = PgNotificationStore::new(pool);

    let unread = store.query_notifications(filter(1, true), 0, 10).await.unwrap();
    assert_eq!(unread.total_count, 3);
    assert!(unread.items.iter().all(|n| !n.is_read));
    assert_eq!(store.unread_count(1).await.unwrap(), 3);

    assert_eq!(store.mark_all_read(1).await.unwrap(), 3);
    assert_eq!(store.unread_count(1).await.unwrap(), 0);
}
