//! Repository for the `leads` table.

use glavtrub_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead::{CreateLead, Lead, LeadListParams};

const COLUMNS: &str = "id, name, phone, email, message, source, status, page_url, utm_source, \
                       utm_medium, utm_campaign, utm_term, utm_content, created_at, updated_at";

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 500;

pub struct LeadRepo;

impl LeadRepo {
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (name, phone, email, message, source, page_url, utm_source, \
                 utm_medium, utm_campaign, utm_term, utm_content) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'site'), $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.message)
            .bind(&input.source)
            .bind(&input.page_url)
            .bind(&input.utm.utm_source)
            .bind(&input.utm.utm_medium)
            .bind(&input.utm.utm_campaign)
            .bind(&input.utm.utm_term)
            .bind(&input.utm.utm_content)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Newest first, optionally filtered by status.
    pub async fn list(pool: &PgPool, params: &LeadListParams) -> Result<Vec<Lead>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);
        let query = format!(
            "SELECT {COLUMNS} FROM leads \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&params.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Lead>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM leads ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("UPDATE leads SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
