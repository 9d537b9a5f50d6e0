//! Admin CRUD for company services.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_core::slug::validate_slug;
use glavtrub_core::types::DbId;
use glavtrub_db::models::service::{CreateService, UpdateService};
use glavtrub_db::repositories::ServiceRepo;

use super::{clean_html, require_non_empty, resolve_slug};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Service",
        id,
    })
}

async fn check_slug(state: &AppState, slug: &str, exclude_id: Option<DbId>) -> AppResult<()> {
    if ServiceRepo::slug_taken(&state.pool, slug, exclude_id).await? {
        return Err(CoreError::Conflict(format!("Service slug '{slug}' is already in use")).into());
    }
    Ok(())
}

/// GET /api/v1/admin/services
pub async fn list(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let services = ServiceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/v1/admin/services/{id}
pub async fn get(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: service }))
}

/// POST /api/v1/admin/services
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<CreateService>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.title, "Title")?;
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    check_slug(&state, &slug, None).await?;
    clean_html(&mut input.content_html);
    clean_html(&mut input.seo_text_html);

    let service = ServiceRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(service_id = service.id, slug = %service.slug, user_id = staff.user_id, "Service created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

/// PUT /api/v1/admin/services/{id}
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateService>,
) -> AppResult<impl IntoResponse> {
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
        check_slug(&state, slug, Some(id)).await?;
    }
    clean_html(&mut input.content_html);
    clean_html(&mut input.seo_text_html);

    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(service_id = id, user_id = staff.user_id, "Service updated");

    Ok(Json(DataResponse { data: service }))
}

/// DELETE /api/v1/admin/services/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ServiceRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(service_id = id, user_id = staff.user_id, "Service deleted");

    Ok(StatusCode::NO_CONTENT)
}
