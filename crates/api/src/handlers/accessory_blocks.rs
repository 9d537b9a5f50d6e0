//! Admin CRUD for accessory blocks.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_core::types::DbId;
use glavtrub_db::models::accessory_block::{CreateAccessoryBlock, UpdateAccessoryBlock};
use glavtrub_db::repositories::AccessoryBlockRepo;

use super::{clean_html, require_non_empty};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::ProductLineFilter;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "AccessoryBlock",
        id,
    })
}

/// GET /api/v1/admin/accessory-blocks?product_line_id=
pub async fn list(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(filter): Query<ProductLineFilter>,
) -> AppResult<impl IntoResponse> {
    let blocks = AccessoryBlockRepo::list_by_line(&state.pool, filter.product_line_id).await?;
    Ok(Json(DataResponse { data: blocks }))
}

/// GET /api/v1/admin/accessory-blocks/{id}
pub async fn get(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let block = AccessoryBlockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: block }))
}

/// POST /api/v1/admin/accessory-blocks
///
/// `table_html` is sanitized like any other rich text; the size matcher
/// only needs `table`, `tr`, `th` and `td`, all of which survive.
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<CreateAccessoryBlock>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.name, "Name")?;
    clean_html(&mut input.description_html);
    clean_html(&mut input.table_html);

    let block = AccessoryBlockRepo::create(&state.pool, &input).await?;

    tracing::info!(
        accessory_block_id = block.id,
        product_line_id = block.product_line_id,
        user_id = staff.user_id,
        "Accessory block created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: block })))
}

/// PUT /api/v1/admin/accessory-blocks/{id}
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateAccessoryBlock>,
) -> AppResult<impl IntoResponse> {
    clean_html(&mut input.description_html);
    clean_html(&mut input.table_html);

    let block = AccessoryBlockRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(accessory_block_id = id, user_id = staff.user_id, "Accessory block updated");

    Ok(Json(DataResponse { data: block }))
}

/// DELETE /api/v1/admin/accessory-blocks/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !AccessoryBlockRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(accessory_block_id = id, user_id = staff.user_id, "Accessory block deleted");

    Ok(StatusCode::NO_CONTENT)
}
