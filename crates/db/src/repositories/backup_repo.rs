//! Whole-database JSON export and restore.
//!
//! Rows travel as plain JSON objects (`row_to_json`), and restore goes
//! through `jsonb_populate_recordset`, so the document shape follows the
//! schema without a per-table mapping. Restore upserts by `id` and resets
//! each table's id sequence afterwards.

use std::collections::BTreeMap;

use chrono::Utc;
use sqlx::{PgConnection, PgPool};

use crate::models::backup::{
    BackupDocument, BackupError, ImportSummary, TableImport, BACKUP_TABLES, BACKUP_VERSION,
};

pub struct BackupRepo;

impl BackupRepo {
    /// Snapshot every backed-up table inside one read transaction.
    pub async fn export(pool: &PgPool) -> Result<BackupDocument, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let mut tables = BTreeMap::new();
        for table in BACKUP_TABLES {
            let query = format!(
                "SELECT COALESCE(json_agg(row_to_json(t) ORDER BY t.id), '[]'::json) \
                 FROM {table} t"
            );
            let (rows,): (serde_json::Value,) =
                sqlx::query_as(&query).fetch_one(&mut *tx).await?;
            let rows = match rows {
                serde_json::Value::Array(rows) => rows,
                _ => Vec::new(),
            };
            tables.insert((*table).to_string(), rows);
        }
        tx.commit().await?;

        Ok(BackupDocument {
            version: BACKUP_VERSION.to_string(),
            exported_at: Utc::now(),
            tables,
        })
    }

    /// Restore a document in a single transaction.
    ///
    /// With `clear_existing` every backed-up table is emptied first;
    /// otherwise rows are merged by primary key. Nothing is written when any
    /// table fails.
    pub async fn import(
        pool: &PgPool,
        doc: &BackupDocument,
        clear_existing: bool,
    ) -> Result<ImportSummary, BackupError> {
        doc.validate()?;

        let mut tx = pool.begin().await?;
        if clear_existing {
            for table in BACKUP_TABLES.iter().rev() {
                sqlx::query(&format!("DELETE FROM {table}"))
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let mut summary = ImportSummary::default();
        for table in BACKUP_TABLES {
            let Some(rows) = doc.tables.get(*table) else {
                continue;
            };
            let outcome = if rows.is_empty() {
                TableImport::default()
            } else {
                upsert_rows(&mut tx, table, rows).await?
            };
            reset_sequence(&mut tx, table).await?;
            summary.tables.insert((*table).to_string(), outcome);
        }

        tx.commit().await?;

        let total = summary.total();
        tracing::info!(
            clear_existing,
            imported = total.imported,
            updated = total.updated,
            "Backup restored"
        );
        Ok(summary)
    }
}

async fn table_columns(conn: &mut PgConnection, table: &str) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT column_name::TEXT FROM information_schema.columns \
         WHERE table_schema = current_schema() AND table_name = $1 \
         ORDER BY ordinal_position",
    )
    .bind(table)
    .fetch_all(conn)
    .await?;
    Ok(rows.into_iter().map(|(c,)| c).collect())
}

async fn upsert_rows(
    conn: &mut PgConnection,
    table: &str,
    rows: &[serde_json::Value],
) -> Result<TableImport, sqlx::Error> {
    let columns = table_columns(conn, table).await?;
    let column_list = columns
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let assignments = columns
        .iter()
        .filter(|c| c.as_str() != "id")
        .map(|c| format!("\"{c}\" = EXCLUDED.\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");

    let query = format!(
        "INSERT INTO {table} ({column_list}) \
         SELECT {column_list} FROM jsonb_populate_recordset(NULL::{table}, $1) \
         ON CONFLICT (id) DO UPDATE SET {assignments} \
         RETURNING (xmax = 0) AS inserted"
    );
    let flags: Vec<(bool,)> = sqlx::query_as(&query)
        .bind(serde_json::Value::Array(rows.to_vec()))
        .fetch_all(conn)
        .await?;

    let imported = flags.iter().filter(|(inserted,)| *inserted).count() as u64;
    Ok(TableImport {
        imported,
        updated: flags.len() as u64 - imported,
    })
}

async fn reset_sequence(conn: &mut PgConnection, table: &str) -> Result<(), sqlx::Error> {
    let query = format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
             GREATEST((SELECT COALESCE(MAX(id), 0) FROM {table}), 1), \
             (SELECT COUNT(*) > 0 FROM {table}))"
    );
    sqlx::query(&query).execute(conn).await?;
    Ok(())
}
