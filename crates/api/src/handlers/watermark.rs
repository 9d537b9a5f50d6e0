//! Gallery images served with the site watermark.

use std::path::Path as FsPath;

use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use glavtrub_core::imaging::{render_gallery_image, OutputFormat};
use glavtrub_core::types::DbId;
use glavtrub_db::models::gallery_image::GalleryOwner;
use glavtrub_db::models::setting::{SETTING_WATERMARK_IMAGE, SETTING_WATERMARK_OPACITY};
use glavtrub_db::repositories::{GalleryImageRepo, SettingRepo};

use super::uploads::static_file_path;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const DEFAULT_OPACITY: f32 = 1.0;

fn image_not_found() -> AppError {
    AppError::NotFound("Image".into())
}

async fn read_file(path: &FsPath) -> AppResult<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            image_not_found()
        } else {
            AppError::InternalError(format!("Failed to read {}: {e}", path.display()))
        }
    })
}

fn parse_opacity(value: Option<&str>) -> f32 {
    value
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
        .unwrap_or(DEFAULT_OPACITY)
}

/// Watermark file and opacity from settings. `None` when no watermark is
/// configured or its file cannot be read.
async fn load_watermark(state: &AppState) -> AppResult<Option<(Vec<u8>, f32)>> {
    let mark_url = SettingRepo::get(&state.pool, SETTING_WATERMARK_IMAGE)
        .await?
        .filter(|v| !v.trim().is_empty());
    let Some(mark_path) = mark_url.as_deref().and_then(|u| static_file_path(&state.config, u))
    else {
        return Ok(None);
    };
    let mark = match tokio::fs::read(&mark_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, path = %mark_path.display(), "Watermark image unreadable");
            return Ok(None);
        }
    };
    let opacity = parse_opacity(
        SettingRepo::get(&state.pool, SETTING_WATERMARK_OPACITY)
            .await?
            .as_deref(),
    );
    Ok(Some((mark, opacity)))
}

/// GET /wm/{kind}/{id}/
///
/// `kind` is a gallery owner kind (`home`, `service`, `product_line`). The
/// stored rotation is applied and the site watermark overlaid unless the
/// image opts out. The original file is served as is when there is nothing
/// to do or processing fails.
pub async fn watermarked_image(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<Response> {
    let owner: GalleryOwner = kind.parse().map_err(|_| image_not_found())?;
    let image = GalleryImageRepo::find_for_kind(&state.pool, owner, id)
        .await?
        .ok_or_else(image_not_found)?;

    let source = static_file_path(&state.config, &image.image_path).ok_or_else(image_not_found)?;
    let format = OutputFormat::for_path(&image.image_path);
    let original = read_file(&source).await?;
    let raw = |bytes: Vec<u8>| ([(CONTENT_TYPE, format.content_type())], bytes).into_response();

    let watermark = if image.no_watermark {
        None
    } else {
        load_watermark(&state).await?
    };
    if watermark.is_none() && image.rotation.rem_euclid(360) == 0 {
        return Ok(raw(original));
    }

    let base = original.clone();
    let rotation = image.rotation;
    let result = tokio::task::spawn_blocking(move || {
        let (mark, opacity) = match &watermark {
            Some((mark, opacity)) => (Some(mark.as_slice()), *opacity),
            None => (None, DEFAULT_OPACITY),
        };
        render_gallery_image(&base, mark, rotation, opacity, format)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Image task failed: {e}")))?;

    match result {
        Ok(bytes) => Ok((
            [
                (CONTENT_TYPE, format.content_type()),
                (CACHE_CONTROL, "public, max-age=86400"),
            ],
            bytes,
        )
            .into_response()),
        Err(e) => {
            tracing::warn!(error = %e, image_id = image.id, "Gallery image processing failed, serving original");
            Ok(raw(original))
        }
    }
}
