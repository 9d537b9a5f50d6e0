//! Repository for the `settings` table.

use sqlx::PgPool;

use crate::models::setting::{Setting, SettingValue};

const COLUMNS: &str = "id, key, value, description, created_at, updated_at";

pub struct SettingRepo;

impl SettingRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings ORDER BY key");
        sqlx::query_as::<_, Setting>(&query).fetch_all(pool).await
    }

    /// Value of `key`; unset and empty values both read as `None`.
    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(value,)| value).filter(|v| !v.is_empty()))
    }

    /// Insert or overwrite each entry in one transaction.
    pub async fn save_all(pool: &PgPool, values: &[SettingValue]) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for entry in values {
            sqlx::query(
                "INSERT INTO settings (key, value, description) \
                 VALUES ($1, $2, COALESCE($3, '')) \
                 ON CONFLICT (key) DO UPDATE SET \
                     value = EXCLUDED.value, \
                     description = COALESCE($3, settings.description)",
            )
            .bind(&entry.key)
            .bind(&entry.value)
            .bind(&entry.description)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
