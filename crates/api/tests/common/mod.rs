#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use notifeed_core::pagination::PaginationConfig;
use notifeed_core::reader::PaginatedNotificationReader;
use notifeed_core::store::DynNotificationStore;
use notifeed_core::types::DbId;
use tower::ServiceExt;

use notifeed_api::auth::jwt::{generate_access_token, JwtConfig};
use notifeed_api::config::ServerConfig;
use notifeed_api::router::build_app_router;
use notifeed_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        pagination: PaginationConfig::default(),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over the given store, using the same
/// middleware stack as production.
pub fn build_test_app(store: DynNotificationStore) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        reader: PaginatedNotificationReader::new(store, config.pagination),
    };
    build_app_router(state, &config)
}

/// Bearer token for `user_id` signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

pub async fn send(app: Router, method: Method, uri: &str, token: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token)).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
