//! Admin CRUD for static content pages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_core::slug::validate_slug;
use glavtrub_core::types::DbId;
use glavtrub_db::models::page::{CreatePage, UpdatePage};
use glavtrub_db::repositories::PageRepo;

use super::{clean_html, require_non_empty};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Pages are addressed by their full public path, always `/.../`.
pub(crate) fn normalize_url_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Page", id })
}

/// GET /api/v1/admin/pages
pub async fn list(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let pages = PageRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// GET /api/v1/admin/pages/{id}
pub async fn get(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/admin/pages
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<CreatePage>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.title, "Title")?;
    validate_slug(&input.slug)?;
    input.url_path = normalize_url_path(&input.url_path);
    clean_html(&mut input.content_html);
    clean_html(&mut input.seo_text_html);

    let page = PageRepo::create(&state.pool, &input).await?;

    tracing::info!(page_id = page.id, url = %page.url_path, user_id = staff.user_id, "Page created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: page })))
}

/// PUT /api/v1/admin/pages/{id}
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdatePage>,
) -> AppResult<impl IntoResponse> {
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    if let Some(path) = input.url_path.as_mut() {
        *path = normalize_url_path(path);
    }
    clean_html(&mut input.content_html);
    clean_html(&mut input.seo_text_html);

    let page = PageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(page_id = id, user_id = staff.user_id, "Page updated");

    Ok(Json(DataResponse { data: page }))
}

/// DELETE /api/v1/admin/pages/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !PageRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(page_id = id, user_id = staff.user_id, "Page deleted");

    Ok(StatusCode::NO_CONTENT)
}
