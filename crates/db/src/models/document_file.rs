//! Downloadable documents (certificates, price lists).

use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DocumentFile {
    pub id: DbId,
    pub title: String,
    pub file_path: String,
    pub doc_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocumentFile {
    pub title: String,
    pub file_path: String,
    pub doc_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDocumentFile {
    pub title: Option<String>,
    pub file_path: Option<String>,
    pub doc_type: Option<String>,
}
