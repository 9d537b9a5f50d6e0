//! Route definitions for the `/admin/leads` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// ```text
/// GET    /leads               -> list (?status=&limit=&offset=)
/// GET    /leads/{id}          -> get
/// PUT    /leads/{id}/status   -> set_status
/// DELETE /leads/{id}          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/leads", get(leads::list))
        .route("/leads/{id}", get(leads::get).delete(leads::delete))
        .route("/leads/{id}/status", put(leads::set_status))
}
