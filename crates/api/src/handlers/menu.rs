//! Admin CRUD for top navigation entries.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_core::types::DbId;
use glavtrub_db::models::menu_item::{CreateMenuItem, UpdateMenuItem};
use glavtrub_db::repositories::MenuItemRepo;

use super::require_non_empty;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MenuItem",
        id,
    })
}

/// GET /api/v1/admin/menu
pub async fn list(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = MenuItemRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/menu/{id}
pub async fn get(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = MenuItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/admin/menu
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateMenuItem>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.title, "Title")?;
    require_non_empty(&input.url, "URL")?;

    let item = MenuItemRepo::create(&state.pool, &input).await?;

    tracing::info!(menu_item_id = item.id, user_id = staff.user_id, "Menu item created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/admin/menu/{id}
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMenuItem>,
) -> AppResult<impl IntoResponse> {
    let item = MenuItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(menu_item_id = id, user_id = staff.user_id, "Menu item updated");

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/menu/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !MenuItemRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(menu_item_id = id, user_id = staff.user_id, "Menu item deleted");

    Ok(StatusCode::NO_CONTENT)
}
