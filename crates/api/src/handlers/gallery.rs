//! Admin management of gallery images (home page, services, product lines).
//!
//! Images are uploaded first through `/admin/uploads/images`; a gallery
//! entry then references the returned path. Deleting an entry also removes
//! the file.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_core::types::DbId;
use glavtrub_db::models::gallery_image::{CreateGalleryImage, GalleryOwner, UpdateGalleryImage};
use glavtrub_db::repositories::GalleryImageRepo;

use super::uploads::remove_static_file;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::GalleryFilter;
use crate::response::DataResponse;
use crate::state::AppState;

const ROTATIONS: &[i32] = &[0, 90, 180, 270];

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "GalleryImage",
        id,
    })
}

fn check_rotation(rotation: Option<i32>) -> AppResult<()> {
    match rotation {
        Some(r) if !ROTATIONS.contains(&r) => Err(CoreError::Validation(format!(
            "Rotation must be 0, 90, 180 or 270 degrees, got {r}"
        ))
        .into()),
        _ => Ok(()),
    }
}

fn check_owner(owner: GalleryOwner, owner_id: Option<DbId>) -> AppResult<()> {
    if owner.requires_owner_id() != owner_id.is_some() {
        let msg = if owner.requires_owner_id() {
            format!("Gallery '{owner}' requires owner_id")
        } else {
            format!("Gallery '{owner}' does not take owner_id")
        };
        return Err(CoreError::Validation(msg).into());
    }
    Ok(())
}

/// GET /api/v1/admin/gallery?kind=&owner_id=
pub async fn list(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(filter): Query<GalleryFilter>,
) -> AppResult<impl IntoResponse> {
    let owner: GalleryOwner = filter.kind.parse().map_err(AppError::BadRequest)?;
    check_owner(owner, filter.owner_id)?;
    let images = GalleryImageRepo::list_for_owner(&state.pool, owner, filter.owner_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/admin/gallery
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateGalleryImage>,
) -> AppResult<impl IntoResponse> {
    check_owner(input.owner_kind, input.owner_id)?;
    check_rotation(input.rotation)?;
    if !input.image_path.starts_with("/static/") {
        return Err(AppError::BadRequest(
            "image_path must be an uploaded /static/ path".into(),
        ));
    }

    let image = GalleryImageRepo::create(&state.pool, &input).await?;

    tracing::info!(
        gallery_image_id = image.id,
        kind = %image.owner_kind,
        owner_id = ?image.owner_id,
        user_id = staff.user_id,
        "Gallery image added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// PUT /api/v1/admin/gallery/{id}
///
/// Setting `is_main` clears the flag on the owner's other images.
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGalleryImage>,
) -> AppResult<impl IntoResponse> {
    check_rotation(input.rotation)?;

    let image = GalleryImageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(gallery_image_id = id, user_id = staff.user_id, "Gallery image updated");

    Ok(Json(DataResponse { data: image }))
}

/// DELETE /api/v1/admin/gallery/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let image = GalleryImageRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    remove_static_file(&state.config, &image.image_path).await;

    tracing::info!(gallery_image_id = id, user_id = staff.user_id, "Gallery image deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_id_must_match_kind() {
        assert!(check_owner(GalleryOwner::Home, None).is_ok());
        assert!(check_owner(GalleryOwner::Home, Some(1)).is_err());
        assert!(check_owner(GalleryOwner::Service, Some(3)).is_ok());
        assert!(check_owner(GalleryOwner::ProductLine, None).is_err());
    }

    #[test]
    fn rotation_is_quarter_turns() {
        assert!(check_rotation(None).is_ok());
        assert!(check_rotation(Some(270)).is_ok());
        assert!(check_rotation(Some(45)).is_err());
    }
}
