//! Repository for the `document_files` table.

use glavtrub_core::types::DbId;
use sqlx::PgPool;

use crate::models::document_file::{CreateDocumentFile, DocumentFile, UpdateDocumentFile};

const COLUMNS: &str = "id, title, file_path, doc_type, created_at, updated_at";

pub struct DocumentFileRepo;

impl DocumentFileRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateDocumentFile,
    ) -> Result<DocumentFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO document_files (title, file_path, doc_type) \
             VALUES ($1, $2, COALESCE($3, 'other')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentFile>(&query)
            .bind(&input.title)
            .bind(&input.file_path)
            .bind(&input.doc_type)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<DocumentFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM document_files ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, DocumentFile>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDocumentFile,
    ) -> Result<Option<DocumentFile>, sqlx::Error> {
        let query = format!(
            "UPDATE document_files SET \
                 title = COALESCE($2, title), \
                 file_path = COALESCE($3, file_path), \
                 doc_type = COALESCE($4, doc_type) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentFile>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.file_path)
            .bind(&input.doc_type)
            .fetch_optional(pool)
            .await
    }

    /// Delete a document row, returning it so the caller can remove the file.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<DocumentFile>, sqlx::Error> {
        let query = format!("DELETE FROM document_files WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, DocumentFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
