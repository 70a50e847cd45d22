use std::sync::Arc;

use notifeed_core::reader::PaginatedNotificationReader;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT secret, pagination bounds).
    pub config: Arc<ServerConfig>,
    /// Notification reader over the configured store.
    pub reader: PaginatedNotificationReader,
}
