pub mod health;
pub mod notification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /notifications                  list (GET)
/// /notifications/unread-count     unread count (GET)
/// /notifications/read-all         mark all read (POST)
/// /notifications/{id}/read        mark one read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/notifications", notification::router())
}
