//! Admin CRUD for redirect rules.
//!
//! Paths are normalized before validation; a rule that would bounce a
//! request straight back to an existing rule's source is rejected.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_core::redirect::{check_redirect_cycle, normalize_rule_paths, validate_rule};
use glavtrub_core::types::DbId;
use glavtrub_db::models::redirect_rule::{CreateRedirectRule, UpdateRedirectRule};
use glavtrub_db::repositories::RedirectRuleRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_CODE: i32 = 301;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "RedirectRule",
        id,
    })
}

/// Normalize and validate a rule, then check it against the stored ones.
/// Returns the normalized `(from, to)`.
async fn prepare_rule(
    state: &AppState,
    from: &str,
    to: &str,
    code: i32,
    is_wildcard: bool,
    exclude_id: Option<DbId>,
) -> AppResult<(String, String)> {
    let (from, to) = normalize_rule_paths(from, to, is_wildcard);
    validate_rule(&from, &to, code, is_wildcard)?;

    let existing = RedirectRuleRepo::pairs(&state.pool, exclude_id).await?;
    check_redirect_cycle(
        &from,
        &to,
        existing.iter().map(|(f, t)| (f.as_str(), t.as_str())),
    )?;
    Ok((from, to))
}

/// GET /api/v1/admin/redirects
///
/// In evaluation order (`sort_order`, then id).
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rules = RedirectRuleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: rules }))
}

/// GET /api/v1/admin/redirects/{id}
pub async fn get(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rule = RedirectRuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: rule }))
}

/// POST /api/v1/admin/redirects
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateRedirectRule>,
) -> AppResult<impl IntoResponse> {
    let code = input.code.unwrap_or(DEFAULT_CODE);
    let is_wildcard = input.is_wildcard.unwrap_or(false);
    let (from, to) = prepare_rule(&state, &input.from_path, &input.to_path, code, is_wildcard, None).await?;
    input.from_path = from;
    input.to_path = to;
    input.code = Some(code);

    let rule = RedirectRuleRepo::create(&state.pool, &input).await?;

    tracing::info!(
        redirect_id = rule.id,
        from = %rule.from_path,
        to = %rule.to_path,
        code = rule.code,
        user_id = admin.user_id,
        "Redirect rule created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: rule })))
}

/// PUT /api/v1/admin/redirects/{id}
///
/// The merged rule (stored values overlaid with the request) is validated
/// as a whole.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateRedirectRule>,
) -> AppResult<impl IntoResponse> {
    let current = RedirectRuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let from = input.from_path.as_deref().unwrap_or(&current.from_path);
    let to = input.to_path.as_deref().unwrap_or(&current.to_path);
    let code = input.code.unwrap_or(current.code);
    let is_wildcard = input.is_wildcard.unwrap_or(current.is_wildcard);
    let (from, to) = prepare_rule(&state, from, to, code, is_wildcard, Some(id)).await?;
    input.from_path = Some(from);
    input.to_path = Some(to);

    let rule = RedirectRuleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(redirect_id = id, user_id = admin.user_id, "Redirect rule updated");

    Ok(Json(DataResponse { data: rule }))
}

/// DELETE /api/v1/admin/redirects/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !RedirectRuleRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(redirect_id = id, user_id = admin.user_id, "Redirect rule deleted");

    Ok(StatusCode::NO_CONTENT)
}
