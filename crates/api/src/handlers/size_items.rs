//! Admin CRUD for size items.
//!
//! `full_name` and `size_slug` are derived from the product line name and
//! the size text unless given explicitly.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::catalog::{default_size_slug, size_full_name, sort_by_size};
use glavtrub_core::error::CoreError;
use glavtrub_core::slug::validate_slug;
use glavtrub_core::types::DbId;
use glavtrub_db::models::product_line::ProductLine;
use glavtrub_db::models::size_item::{CreateSizeItem, UpdateSizeItem};
use glavtrub_db::repositories::{ProductLineRepo, SizeItemRepo};

use super::require_non_empty;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::ProductLineFilter;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "SizeItem",
        id,
    })
}

async fn load_line(state: &AppState, id: DbId) -> AppResult<ProductLine> {
    ProductLineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductLine",
            id,
        }))
}

fn check_pricing(price: Option<f64>, discount: Option<f64>) -> AppResult<()> {
    if price.is_some_and(|p| p < 0.0) {
        return Err(CoreError::Validation("Price must not be negative".into()).into());
    }
    if discount.is_some_and(|d| !(0.0..=100.0).contains(&d)) {
        return Err(CoreError::Validation(
            "Discount must be between 0 and 100 percent".into(),
        )
        .into());
    }
    Ok(())
}

async fn check_slug(
    state: &AppState,
    line_id: DbId,
    slug: &str,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    validate_slug(slug)?;
    if SizeItemRepo::slug_taken(&state.pool, line_id, slug, exclude_id).await? {
        return Err(CoreError::Conflict(format!(
            "Size slug '{slug}' is already used in this product line"
        ))
        .into());
    }
    Ok(())
}

/// GET /api/v1/admin/size-items?product_line_id=
///
/// Sorted numerically by size.
pub async fn list(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(filter): Query<ProductLineFilter>,
) -> AppResult<impl IntoResponse> {
    let mut items = SizeItemRepo::list_by_line(&state.pool, filter.product_line_id).await?;
    sort_by_size(&mut items, |item| item.size_text.as_str());
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/size-items/{id}
pub async fn get(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = SizeItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/admin/size-items
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<CreateSizeItem>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.size_text, "Size")?;
    check_pricing(input.price, input.discount_percent)?;
    let line = load_line(&state, input.product_line_id).await?;

    let size_slug = input
        .size_slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| default_size_slug(&input.size_text), str::to_string);
    check_slug(&state, line.id, &size_slug, None).await?;

    if input.full_name.as_deref().map_or(true, |n| n.trim().is_empty()) {
        input.full_name = Some(size_full_name(&line.name, &input.size_text));
    }

    let item = SizeItemRepo::create(&state.pool, &input, &size_slug).await?;

    tracing::info!(
        size_item_id = item.id,
        product_line_id = line.id,
        user_id = staff.user_id,
        "Size item created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/admin/size-items/{id}
///
/// Changing the size text or product line regenerates `full_name` unless a
/// new one is supplied in the same request.
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateSizeItem>,
) -> AppResult<impl IntoResponse> {
    check_pricing(input.price, input.discount_percent)?;
    let current = SizeItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let line_id = input.product_line_id.unwrap_or(current.product_line_id);

    if input.size_slug.is_some() || input.product_line_id.is_some() {
        let slug = input.size_slug.clone().unwrap_or_else(|| current.size_slug.clone());
        check_slug(&state, line_id, &slug, Some(id)).await?;
    }

    let renamed = input.size_text.is_some() || input.product_line_id.is_some();
    if renamed && input.full_name.is_none() {
        let line = load_line(&state, line_id).await?;
        let size_text = input.size_text.as_deref().unwrap_or(&current.size_text);
        input.full_name = Some(size_full_name(&line.name, size_text));
    }

    let item = SizeItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(size_item_id = id, user_id = staff.user_id, "Size item updated");

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/size-items/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !SizeItemRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(size_item_id = id, user_id = staff.user_id, "Size item deleted");

    Ok(StatusCode::NO_CONTENT)
}
