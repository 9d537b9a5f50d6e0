//! Full-database JSON backup document.

use std::collections::BTreeMap;

use glavtrub_core::types::Timestamp;
use serde::{Deserialize, Serialize};

pub const BACKUP_VERSION: &str = "1.0";

/// Tables included in a backup, parents before children.
pub const BACKUP_TABLES: &[&str] = &[
    "users",
    "pages",
    "menu_items",
    "site_sections",
    "categories",
    "product_lines",
    "size_items",
    "accessory_blocks",
    "services",
    "news",
    "document_files",
    "gallery_images",
    "leads",
    "redirect_rules",
    "settings",
];

/// `{version, exported_at, tables: {name: [row, ...]}}`.
///
/// Rows are kept as raw JSON objects keyed by column name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    pub version: String,
    pub exported_at: Timestamp,
    pub tables: BTreeMap<String, Vec<serde_json::Value>>,
}

/// Per-table outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableImport {
    pub imported: u64,
    pub updated: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub tables: BTreeMap<String, TableImport>,
}

impl ImportSummary {
    pub fn total(&self) -> TableImport {
        self.tables.values().fold(TableImport::default(), |acc, t| TableImport {
            imported: acc.imported + t.imported,
            updated: acc.updated + t.updated,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("Unsupported backup version: {0}")]
    UnsupportedVersion(String),

    #[error("Unknown table in backup: {0}")]
    UnknownTable(String),

    #[error("Table {table}: row {index} is not a JSON object")]
    InvalidRow { table: String, index: usize },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl BackupDocument {
    /// Reject documents this build cannot restore.
    pub fn validate(&self) -> Result<(), BackupError> {
        if self.version != BACKUP_VERSION {
            return Err(BackupError::UnsupportedVersion(self.version.clone()));
        }
        for (table, rows) in &self.tables {
            if !BACKUP_TABLES.contains(&table.as_str()) {
                return Err(BackupError::UnknownTable(table.clone()));
            }
            if let Some(index) = rows.iter().position(|row| !row.is_object()) {
                return Err(BackupError::InvalidRow {
                    table: table.clone(),
                    index,
                });
            }
        }
        Ok(())
    }
}
