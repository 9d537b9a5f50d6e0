//! CSV import, CSV templates and full JSON backups.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use glavtrub_core::csv_import::{
    parse_categories, parse_news, parse_product_lines, parse_size_items, ImportKind, ImportReport,
};
use glavtrub_db::models::backup::BackupDocument;
use glavtrub_db::repositories::{BackupRepo, ImportRepo};

use super::uploads::read_upload_form;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::RestoreParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn attachment(filename: &str) -> String {
    format!("attachment; filename=\"{filename}\"")
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/import/{kind}/template
///
/// A CSV file with the expected header row and one example row.
pub async fn template(
    _admin: RequireAdmin,
    Path(kind): Path<String>,
) -> AppResult<impl IntoResponse> {
    let kind: ImportKind = kind.parse()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&kind.template_filename())),
        ],
        kind.template(),
    ))
}

/// POST /api/v1/admin/import/{kind}
///
/// Multipart with a `file` field holding a semicolon-delimited CSV. Rows
/// are upserted by slug; bad rows are reported and skipped.
pub async fn import_csv(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let kind: ImportKind = kind.parse()?;
    let form = read_upload_form(multipart).await?;
    let bytes = form.data.as_slice();
    let pool = &state.pool;

    let report: ImportReport = match kind {
        ImportKind::Categories => ImportRepo::import_categories(pool, &parse_categories(bytes)?).await?,
        ImportKind::ProductLines => {
            ImportRepo::import_product_lines(pool, &parse_product_lines(bytes)?).await?
        }
        ImportKind::SizeItems => ImportRepo::import_size_items(pool, &parse_size_items(bytes)?).await?,
        ImportKind::News => {
            let today = Utc::now().date_naive();
            ImportRepo::import_news(pool, &parse_news(bytes, today)?).await?
        }
    };

    for error in &report.errors {
        tracing::warn!(kind = kind.as_str(), error = %error, "CSV row skipped");
    }
    tracing::info!(
        kind = kind.as_str(),
        file = %form.filename,
        success = report.success,
        errors = report.errors.len(),
        user_id = admin.user_id,
        "CSV import finished"
    );

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// Backup
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/backup
///
/// Every table as one JSON document, served as a download.
pub async fn export_backup(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let doc = BackupRepo::export(&state.pool).await?;
    let body = serde_json::to_vec_pretty(&doc)
        .map_err(|e| AppError::InternalError(format!("Backup serialization failed: {e}")))?;
    let filename = format!("backup_{}.json", doc.exported_at.format("%Y%m%d_%H%M%S"));

    tracing::info!(tables = doc.tables.len(), user_id = admin.user_id, "Backup exported");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&filename)),
        ],
        body,
    ))
}

/// POST /api/v1/admin/backup?clear_existing=true
///
/// Restore a document produced by [`export_backup`] in one transaction.
/// Without `clear_existing` rows are upserted by id.
pub async fn import_backup(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<RestoreParams>,
    Json(doc): Json<BackupDocument>,
) -> AppResult<impl IntoResponse> {
    let summary = BackupRepo::import(&state.pool, &doc, params.clear_existing).await?;
    let total = summary.total();

    tracing::info!(
        imported = total.imported,
        updated = total.updated,
        clear_existing = params.clear_existing,
        user_id = admin.user_id,
        "Backup restored"
    );

    Ok(Json(DataResponse { data: summary }))
}
