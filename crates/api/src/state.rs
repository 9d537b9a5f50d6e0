use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: glavtrub_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Bus for site events; the lead dispatcher subscribes to it.
    pub event_bus: Arc<glavtrub_events::EventBus>,
}
