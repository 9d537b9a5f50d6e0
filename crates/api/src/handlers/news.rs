//! Admin CRUD for news articles.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_core::slug::{make_unique_slug, validate_slug};
use glavtrub_core::types::DbId;
use glavtrub_db::models::news::{CreateNews, UpdateNews};
use glavtrub_db::repositories::NewsRepo;

use super::{clean_html, require_non_empty, resolve_slug};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "News", id })
}

/// GET /api/v1/admin/news
pub async fn list(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let news = NewsRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: news }))
}

/// GET /api/v1/admin/news/{id}
pub async fn get(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = NewsRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: article }))
}

/// POST /api/v1/admin/news
///
/// An explicit slug must be free; a generated one gets a numeric suffix
/// when it collides.
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<CreateNews>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.title, "Title")?;
    let explicit = input.slug.as_deref().is_some_and(|s| !s.trim().is_empty());
    let base = resolve_slug(input.slug.as_deref(), &input.title)?;
    let taken = NewsRepo::all_slugs(&state.pool).await?;
    let slug = if explicit {
        if taken.contains(&base) {
            return Err(CoreError::Conflict(format!("News slug '{base}' is already in use")).into());
        }
        base
    } else {
        make_unique_slug(&base, &taken)
    };
    clean_html(&mut input.content_html);
    clean_html(&mut input.seo_text_html);

    let article = NewsRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(news_id = article.id, slug = %article.slug, user_id = staff.user_id, "News created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// PUT /api/v1/admin/news/{id}
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateNews>,
) -> AppResult<impl IntoResponse> {
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    clean_html(&mut input.content_html);
    clean_html(&mut input.seo_text_html);

    let article = NewsRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(news_id = id, user_id = staff.user_id, "News updated");

    Ok(Json(DataResponse { data: article }))
}

/// DELETE /api/v1/admin/news/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !NewsRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(news_id = id, user_id = staff.user_id, "News deleted");

    Ok(StatusCode::NO_CONTENT)
}
