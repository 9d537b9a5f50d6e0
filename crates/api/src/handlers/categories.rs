//! Admin CRUD for catalog categories.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_core::slug::{is_reserved_slug, validate_slug};
use glavtrub_core::types::DbId;
use glavtrub_db::models::category::{CreateCategory, UpdateCategory};
use glavtrub_db::repositories::CategoryRepo;

use super::{clean_html, require_non_empty, resolve_slug};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

/// Category slugs share the first URL segment with fixed site sections.
async fn check_slug(state: &AppState, slug: &str, exclude_id: Option<DbId>) -> AppResult<()> {
    if is_reserved_slug(slug) {
        return Err(CoreError::Validation(format!("Slug '{slug}' is reserved")).into());
    }
    if CategoryRepo::slug_taken(&state.pool, slug, exclude_id).await? {
        return Err(CoreError::Conflict(format!("Category slug '{slug}' is already in use")).into());
    }
    Ok(())
}

/// GET /api/v1/admin/categories
pub async fn list(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/admin/categories/{id}
pub async fn get(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /api/v1/admin/categories
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.name, "Name")?;
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;
    check_slug(&state, &slug, None).await?;
    clean_html(&mut input.description_html);
    clean_html(&mut input.seo_text_html);

    let category = CategoryRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(category_id = category.id, slug = %category.slug, user_id = staff.user_id, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/admin/categories/{id}
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
        check_slug(&state, slug, Some(id)).await?;
    }
    clean_html(&mut input.description_html);
    clean_html(&mut input.seo_text_html);

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(category_id = id, user_id = staff.user_id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Cascades to the category's product lines and their size items.
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(category_id = id, user_id = staff.user_id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
