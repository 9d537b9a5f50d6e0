//! Admin editing of the fixed list sections (home, catalog, news, services).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_db::models::site_section::{UpdateSiteSection, SECTION_TITLES};
use glavtrub_db::repositories::SiteSectionRepo;

use super::clean_html;
use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

fn ensure_known(key: &str) -> AppResult<()> {
    if SECTION_TITLES.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Unknown section '{key}'")).into())
    }
}

/// GET /api/v1/admin/sections
///
/// Every known section, created with defaults on first access.
pub async fn list(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let mut sections = Vec::with_capacity(SECTION_TITLES.len());
    for (key, _) in SECTION_TITLES {
        sections.push(SiteSectionRepo::get_or_create(&state.pool, key).await?);
    }
    Ok(Json(DataResponse { data: sections }))
}

/// GET /api/v1/admin/sections/{key}
pub async fn get(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    ensure_known(&key)?;
    let section = SiteSectionRepo::get_or_create(&state.pool, &key).await?;
    Ok(Json(DataResponse { data: section }))
}

/// PUT /api/v1/admin/sections/{key}
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(mut input): Json<UpdateSiteSection>,
) -> AppResult<impl IntoResponse> {
    ensure_known(&key)?;
    clean_html(&mut input.content_html);
    clean_html(&mut input.seo_text_html);

    let section = SiteSectionRepo::upsert(&state.pool, &key, &input).await?;

    tracing::info!(section = %key, user_id = staff.user_id, "Section updated");

    Ok(Json(DataResponse { data: section }))
}
