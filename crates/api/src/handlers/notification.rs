//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use notifeed_core::notification::Notification;
use notifeed_core::pagination::{PageRequest, PaginatedResult};
use notifeed_core::types::DbId;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::NotificationPageParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub marked_read: u64,
}

/// GET /api/v1/notifications
///
/// One page of the authenticated user's notifications, newest first.
/// Out-of-range pagination is clamped, never rejected.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationPageParams>,
) -> AppResult<Json<DataResponse<PaginatedResult<Notification>>>> {
    let request = PageRequest::normalize(
        params.page,
        params.page_size,
        params.unread_only,
        state.reader.config(),
    );

    let page = state.reader.fetch_page(Some(auth.user_id), request).await?;

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let count = state.reader.unread_count(Some(auth.user_id)).await?;

    Ok(Json(DataResponse {
        data: UnreadCount { count },
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Returns 204 No Content on success, or 404 if the notification does not
/// belong to the authenticated user or is already read.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state
        .reader
        .mark_read(Some(auth.user_id), notification_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let marked_read = state.reader.mark_all_read(Some(auth.user_id)).await?;

    Ok(Json(DataResponse {
        data: MarkedRead { marked_read },
    }))
}
