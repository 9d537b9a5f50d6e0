//! Admin CRUD for product lines.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_core::slug::validate_slug;
use glavtrub_core::types::DbId;
use glavtrub_db::models::product_line::{CreateProductLine, UpdateProductLine};
use glavtrub_db::repositories::ProductLineRepo;

use super::{clean_html, require_non_empty, resolve_slug};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::CategoryFilter;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ProductLine",
        id,
    })
}

fn check_discount(discount: Option<f64>) -> AppResult<()> {
    match discount {
        Some(d) if !(0.0..=100.0).contains(&d) => Err(CoreError::Validation(
            "Discount must be between 0 and 100 percent".into(),
        )
        .into()),
        _ => Ok(()),
    }
}

async fn check_slug(
    state: &AppState,
    category_id: DbId,
    slug: &str,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    if ProductLineRepo::slug_taken(&state.pool, category_id, slug, exclude_id).await? {
        return Err(CoreError::Conflict(format!(
            "Product line slug '{slug}' is already used in this category"
        ))
        .into());
    }
    Ok(())
}

/// GET /api/v1/admin/product-lines?category_id=
pub async fn list(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> AppResult<impl IntoResponse> {
    let lines = ProductLineRepo::list(&state.pool, filter.category_id).await?;
    Ok(Json(DataResponse { data: lines }))
}

/// GET /api/v1/admin/product-lines/{id}
pub async fn get(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let line = ProductLineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: line }))
}

/// POST /api/v1/admin/product-lines
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<CreateProductLine>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.name, "Name")?;
    check_discount(input.discount_percent)?;
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;
    check_slug(&state, input.category_id, &slug, None).await?;
    clean_html(&mut input.description_html);
    clean_html(&mut input.seo_text_html);

    let line = ProductLineRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        product_line_id = line.id,
        category_id = line.category_id,
        user_id = staff.user_id,
        "Product line created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: line })))
}

/// PUT /api/v1/admin/product-lines/{id}
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProductLine>,
) -> AppResult<impl IntoResponse> {
    check_discount(input.discount_percent)?;
    if input.slug.is_some() || input.category_id.is_some() {
        let current = ProductLineRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        let slug = input.slug.clone().unwrap_or(current.slug);
        validate_slug(&slug)?;
        let category_id = input.category_id.unwrap_or(current.category_id);
        check_slug(&state, category_id, &slug, Some(id)).await?;
    }
    clean_html(&mut input.description_html);
    clean_html(&mut input.seo_text_html);

    let line = ProductLineRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(product_line_id = id, user_id = staff.user_id, "Product line updated");

    Ok(Json(DataResponse { data: line }))
}

/// DELETE /api/v1/admin/product-lines/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ProductLineRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(product_line_id = id, user_id = staff.user_id, "Product line deleted");

    Ok(StatusCode::NO_CONTENT)
}
