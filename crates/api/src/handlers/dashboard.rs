//! Admin dashboard.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard
///
/// Entity counters plus the most recent leads.
pub async fn stats(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
