//! Admin key/value site settings (Telegram credentials, watermark, ...).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_db::models::setting::{SettingValue, SETTING_WATERMARK_OPACITY};
use glavtrub_db::repositories::SettingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate(values: &[SettingValue]) -> AppResult<()> {
    for value in values {
        if value.key.trim().is_empty() {
            return Err(CoreError::Validation("Setting key must not be empty".into()).into());
        }
        if value.key == SETTING_WATERMARK_OPACITY && !value.value.trim().is_empty() {
            let opacity: f32 = value.value.trim().parse().map_err(|_| {
                CoreError::Validation(format!("{SETTING_WATERMARK_OPACITY} must be a number"))
            })?;
            if !(0.0..=1.0).contains(&opacity) {
                return Err(CoreError::Validation(format!(
                    "{SETTING_WATERMARK_OPACITY} must be between 0 and 1"
                ))
                .into());
            }
        }
    }
    Ok(())
}

/// GET /api/v1/admin/settings
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = SettingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/settings
///
/// Bulk upsert; keys not in the request are left untouched.
pub async fn save(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(values): Json<Vec<SettingValue>>,
) -> AppResult<impl IntoResponse> {
    validate(&values)?;
    SettingRepo::save_all(&state.pool, &values).await?;

    tracing::info!(count = values.len(), user_id = admin.user_id, "Settings saved");

    let settings = SettingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// DELETE /api/v1/admin/settings/{key}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !SettingRepo::delete(&state.pool, &key).await? {
        return Err(AppError::NotFound(format!("Setting '{key}'")));
    }

    tracing::info!(key = %key, user_id = admin.user_id, "Setting deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(key: &str, value: &str) -> SettingValue {
        SettingValue {
            key: key.into(),
            value: value.into(),
            description: None,
        }
    }

    #[test]
    fn opacity_must_be_fraction() {
        assert!(validate(&[value(SETTING_WATERMARK_OPACITY, "0.4")]).is_ok());
        assert!(validate(&[value(SETTING_WATERMARK_OPACITY, "")]).is_ok());
        assert!(validate(&[value(SETTING_WATERMARK_OPACITY, "1.5")]).is_err());
        assert!(validate(&[value(SETTING_WATERMARK_OPACITY, "half")]).is_err());
    }

    #[test]
    fn empty_key_rejected() {
        assert!(validate(&[value(" ", "x")]).is_err());
        assert!(validate(&[value("TELEGRAM_TOKEN", "123:abc")]).is_ok());
    }
}
