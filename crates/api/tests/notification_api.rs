//! Integration tests for the `/api/v1/notifications` endpoints.
//!
//! Runs the full router over an in-memory store:
//! - Pagination scenario (25 notifications, 10 unread)
//! - Clamping of malformed pagination input
//! - Authentication failures
//! - Read-state transitions
//! - Storage outages surfacing as 503

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use common::{body_json, get, get_auth, post_auth, token_for};
use notifeed_core::notification::NewNotification;
use notifeed_core::store::{
    InMemoryNotificationStore, NotificationFilter, NotificationSlice, NotificationStore,
    StoreError,
};
use notifeed_core::types::DbId;

const USER: DbId = 11;
const OTHER_USER: DbId = 12;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 25 notifications for `USER` one minute apart; the 15 oldest are read.
/// `OTHER_USER` gets 3 unread notifications.
async fn seeded_store() -> Arc<InMemoryNotificationStore> {
    let store = Arc::new(InMemoryNotificationStore::new());
    let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

    let mut ids = Vec::new();
    for i in 0..25 {
        let n = store
            .insert_at(
                NewNotification::new(USER, format!("n{i}")),
                t0 + Duration::minutes(i),
            )
            .unwrap();
        ids.push(n.id);
    }
    for id in &ids[..15] {
        assert!(store.mark_read(USER, *id).await.unwrap());
    }
    for i in 0..3 {
        store
            .insert_at(NewNotification::new(OTHER_USER, format!("o{i}")), t0)
            .unwrap();
    }
    store
}

async fn list(store: Arc<InMemoryNotificationStore>, query: &str) -> serde_json::Value {
    let app = common::build_test_app(store);
    let response = get_auth(app, &format!("/api/v1/notifications{query}"), &token_for(USER)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn first_page_has_twenty_of_twenty_five() {
    let data = list(seeded_store().await, "?page=1&page_size=20").await;

    assert_eq!(data["items"].as_array().unwrap().len(), 20);
    assert_eq!(data["total_count"], 25);
    assert_eq!(data["total_pages"], 2);
    assert_eq!(data["page"], 1);
    assert_eq!(data["page_size"], 20);
}

#[tokio::test]
async fn second_page_has_remaining_five() {
    let data = list(seeded_store().await, "?page=2&page_size=20").await;

    assert_eq!(data["items"].as_array().unwrap().len(), 5);
    assert_eq!(data["total_count"], 25);
    assert_eq!(data["total_pages"], 2);
}

#[tokio::test]
async fn unread_only_returns_ten() {
    let data = list(seeded_store().await, "?page=1&page_size=20&unread_only=true").await;
    let items = data["items"].as_array().unwrap();

    assert_eq!(items.len(), 10);
    assert_eq!(data["total_count"], 10);
    assert_eq!(data["total_pages"], 1);
    assert!(items.iter().all(|n| n["is_read"] == false));
}

#[tokio::test]
async fn items_are_newest_first_and_owned_by_caller() {
    let data = list(seeded_store().await, "?page_size=100").await;
    let items = data["items"].as_array().unwrap();

    assert_eq!(items.first().unwrap()["title"], "n24");
    assert_eq!(items.last().unwrap()["title"], "n0");
    assert!(items.iter().all(|n| n["user_id"] == USER));
}

#[tokio::test]
async fn zero_page_and_size_fall_back_to_defaults() {
    let data = list(seeded_store().await, "?page=0&page_size=0").await;

    assert_eq!(data["page"], 1);
    assert_eq!(data["page_size"], 20);
    assert_eq!(data["items"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn missing_query_uses_defaults() {
    let data = list(seeded_store().await, "").await;

    assert_eq!(data["page"], 1);
    assert_eq!(data["page_size"], 20);
}

#[tokio::test]
async fn non_numeric_pagination_is_not_an_error() {
    let data = list(seeded_store().await, "?page=first&page_size=lots").await;

    assert_eq!(data["page"], 1);
    assert_eq!(data["page_size"], 20);
}

#[tokio::test]
async fn oversized_page_size_is_capped() {
    let data = list(seeded_store().await, "?page_size=5000").await;

    assert_eq!(data["page_size"], 100);
    assert_eq!(data["items"].as_array().unwrap().len(), 25);
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let data = list(seeded_store().await, "?page=7&page_size=20").await;

    assert!(data["items"].as_array().unwrap().is_empty());
    assert_eq!(data["total_count"], 25);
    assert_eq!(data["total_pages"], 2);
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = common::build_test_app(seeded_store().await);
    let response = get(app, "/api/v1/notifications").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = common::build_test_app(seeded_store().await);
    let response = get_auth(app, "/api/v1/notifications", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_with_invalid_subject_is_unauthorized() {
    let app = common::build_test_app(seeded_store().await);
    let response = get_auth(app, "/api/v1/notifications", &token_for(0)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Read state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unread_count_reports_callers_unread() {
    let app = common::build_test_app(seeded_store().await);
    let response = get_auth(app, "/api/v1/notifications/unread-count", &token_for(USER)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["count"], 10);
}

#[tokio::test]
async fn mark_read_then_again_is_not_found() {
    let store = seeded_store().await;
    let newest = list(store.clone(), "?page_size=1").await["items"][0]["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/v1/notifications/{newest}/read");

    let first = post_auth(common::build_test_app(store.clone()), &uri, &token_for(USER)).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = post_auth(common::build_test_app(store.clone()), &uri, &token_for(USER)).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(second).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn mark_read_of_foreign_notification_is_not_found() {
    let store = seeded_store().await;
    let newest = list(store.clone(), "?page_size=1").await["items"][0]["id"]
        .as_i64()
        .unwrap();

    let response = post_auth(
        common::build_test_app(store),
        &format!("/api/v1/notifications/{newest}/read"),
        &token_for(OTHER_USER),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn read_all_marks_only_callers_notifications() {
    let store = seeded_store().await;

    let response = post_auth(
        common::build_test_app(store.clone()),
        "/api/v1/notifications/read-all",
        &token_for(USER),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["marked_read"], 10);

    assert_eq!(store.unread_count(USER).await.unwrap(), 0);
    assert_eq!(store.unread_count(OTHER_USER).await.unwrap(), 3);
}

// ---------------------------------------------------------------------------
// Storage outage
// ---------------------------------------------------------------------------

struct DownStore;

#[async_trait]
impl NotificationStore for DownStore {
    async fn query_notifications(
        &self,
        _filter: NotificationFilter,
        _offset: i64,
        _limit: i64,
    ) -> Result<NotificationSlice, StoreError> {
        Err(StoreError::Unavailable("pool timed out".into()))
    }

    async fn unread_count(&self, _user_id: DbId) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable("pool timed out".into()))
    }

    async fn mark_read(&self, _user_id: DbId, _id: DbId) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("pool timed out".into()))
    }

    async fn mark_all_read(&self, _user_id: DbId) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("pool timed out".into()))
    }
}

#[tokio::test]
async fn storage_outage_is_service_unavailable() {
    let app = common::build_test_app(Arc::new(DownStore));
    let response = get_auth(app, "/api/v1/notifications", &token_for(USER)).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["code"], "STORAGE_UNAVAILABLE");
}
