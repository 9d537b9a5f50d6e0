//! Admin management of downloadable documents.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_core::types::DbId;
use glavtrub_db::models::document_file::{CreateDocumentFile, UpdateDocumentFile};
use glavtrub_db::repositories::DocumentFileRepo;

use super::uploads::{read_upload_form, remove_static_file, store_document};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "DocumentFile",
        id,
    })
}

/// GET /api/v1/admin/documents
pub async fn list(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let docs = DocumentFileRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: docs }))
}

/// POST /api/v1/admin/documents
///
/// Multipart: `file` (required), `title` (defaults to the file name),
/// `doc_type` (defaults to `other`).
pub async fn upload(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_upload_form(multipart).await?;
    let file_path = store_document(&state.config, &form.filename, &form.data).await?;

    let input = CreateDocumentFile {
        title: form
            .field("title")
            .map_or_else(|| form.filename.clone(), str::to_string),
        file_path,
        doc_type: form.field("doc_type").map(str::to_string),
    };
    let doc = match DocumentFileRepo::create(&state.pool, &input).await {
        Ok(doc) => doc,
        Err(e) => {
            remove_static_file(&state.config, &input.file_path).await;
            return Err(e.into());
        }
    };

    tracing::info!(document_id = doc.id, path = %doc.file_path, user_id = staff.user_id, "Document uploaded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: doc })))
}

/// PUT /api/v1/admin/documents/{id}
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDocumentFile>,
) -> AppResult<impl IntoResponse> {
    let doc = DocumentFileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(document_id = id, user_id = staff.user_id, "Document updated");

    Ok(Json(DataResponse { data: doc }))
}

/// DELETE /api/v1/admin/documents/{id}
///
/// Removes the stored file as well.
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let doc = DocumentFileRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    remove_static_file(&state.config, &doc.file_path).await;

    tracing::info!(document_id = id, user_id = staff.user_id, "Document deleted");

    Ok(StatusCode::NO_CONTENT)
}
