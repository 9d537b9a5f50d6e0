//! Admin view of contact-form leads.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_core::types::DbId;
use glavtrub_db::models::lead::{LeadListParams, LEAD_STATUSES};
use glavtrub_db::repositories::LeadRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Lead", id })
}

fn check_status(status: &str) -> AppResult<()> {
    if LEAD_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown lead status '{status}'. Expected one of: {}",
            LEAD_STATUSES.join(", ")
        ))
        .into())
    }
}

/// GET /api/v1/admin/leads?status=&limit=&offset=
///
/// Newest first.
pub async fn list(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<LeadListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = &params.status {
        check_status(status)?;
    }
    let leads = LeadRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: leads }))
}

/// GET /api/v1/admin/leads/{id}
pub async fn get(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lead = LeadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: lead }))
}

/// PUT /api/v1/admin/leads/{id}/status
pub async fn set_status(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<impl IntoResponse> {
    check_status(&input.status)?;

    let lead = LeadRepo::set_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(lead_id = id, status = %lead.status, user_id = staff.user_id, "Lead status changed");

    Ok(Json(DataResponse { data: lead }))
}

/// DELETE /api/v1/admin/leads/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !LeadRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(lead_id = id, user_id = staff.user_id, "Lead deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::check_status;

    #[test]
    fn known_statuses_only() {
        assert!(check_status("new").is_ok());
        assert!(check_status("in_progress").is_ok());
        assert!(check_status("archived").is_err());
    }
}
