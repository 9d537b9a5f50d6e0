//! Repository for the `redirect_rules` table.
//!
//! Rule order matters to the resolver (first matching wildcard wins), so
//! every list is ordered by `sort_order, id`.

use glavtrub_core::redirect::RedirectRule as Rule;
use glavtrub_core::types::DbId;
use sqlx::PgPool;

use crate::models::redirect_rule::{CreateRedirectRule, RedirectRule, UpdateRedirectRule};

const COLUMNS: &str = "id, from_path, to_path, code, is_active, is_wildcard, comment, \
                       sort_order, created_at, updated_at";

pub struct RedirectRuleRepo;

impl RedirectRuleRepo {
    /// Insert a rule whose paths were already normalized and validated.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRedirectRule,
    ) -> Result<RedirectRule, sqlx::Error> {
        let query = format!(
            "INSERT INTO redirect_rules (from_path, to_path, code, is_active, is_wildcard, \
                 comment, sort_order) \
             VALUES ($1, $2, COALESCE($3, 301), COALESCE($4, true), COALESCE($5, false), \
                 COALESCE($6, ''), COALESCE($7, 0)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RedirectRule>(&query)
            .bind(&input.from_path)
            .bind(&input.to_path)
            .bind(input.code)
            .bind(input.is_active)
            .bind(input.is_wildcard)
            .bind(&input.comment)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RedirectRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM redirect_rules WHERE id = $1");
        sqlx::query_as::<_, RedirectRule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<RedirectRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM redirect_rules ORDER BY sort_order, id");
        sqlx::query_as::<_, RedirectRule>(&query).fetch_all(pool).await
    }

    /// Active rules converted for the resolver, in table order.
    pub async fn active_rules(pool: &PgPool) -> Result<Vec<Rule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM redirect_rules WHERE is_active = true ORDER BY sort_order, id"
        );
        let rows = sqlx::query_as::<_, RedirectRule>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.iter().filter_map(RedirectRule::to_rule).collect())
    }

    /// `(from_path, to_path)` of every rule except `exclude_id`, for the loop check.
    pub async fn pairs(
        pool: &PgPool,
        exclude_id: Option<DbId>,
    ) -> Result<Vec<(String, String)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT from_path, to_path FROM redirect_rules WHERE id IS DISTINCT FROM $1",
        )
        .bind(exclude_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRedirectRule,
    ) -> Result<Option<RedirectRule>, sqlx::Error> {
        let query = format!(
            "UPDATE redirect_rules SET \
                 from_path = COALESCE($2, from_path), \
                 to_path = COALESCE($3, to_path), \
                 code = COALESCE($4, code), \
                 is_active = COALESCE($5, is_active), \
                 is_wildcard = COALESCE($6, is_wildcard), \
                 comment = COALESCE($7, comment), \
                 sort_order = COALESCE($8, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RedirectRule>(&query)
            .bind(id)
            .bind(&input.from_path)
            .bind(&input.to_path)
            .bind(input.code)
            .bind(input.is_active)
            .bind(input.is_wildcard)
            .bind(&input.comment)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM redirect_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
