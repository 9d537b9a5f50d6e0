//! Repository for the `news` table.

use std::collections::HashSet;

use glavtrub_core::types::DbId;
use sqlx::PgPool;

use crate::models::news::{CreateNews, News, UpdateNews};

const COLUMNS: &str = "id, title, slug, date, content_html, seo_title, seo_description, h1, \
                       seo_text_html, is_published, created_at, updated_at";

pub struct NewsRepo;

impl NewsRepo {
    pub async fn create(pool: &PgPool, input: &CreateNews, slug: &str) -> Result<News, sqlx::Error> {
        let query = format!(
            "INSERT INTO news (title, slug, date, content_html, seo_title, seo_description, h1, \
                 seo_text_html, is_published) \
             VALUES ($1, $2, COALESCE($3, CURRENT_DATE), COALESCE($4, ''), COALESCE($5, ''), \
                 COALESCE($6, ''), COALESCE($7, ''), COALESCE($8, ''), COALESCE($9, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(input.date)
            .bind(&input.content_html)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .bind(&input.h1)
            .bind(&input.seo_text_html)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE slug = $1 AND is_published = true");
        sqlx::query_as::<_, News>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news ORDER BY date DESC, id DESC");
        sqlx::query_as::<_, News>(&query).fetch_all(pool).await
    }

    pub async fn list_published(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news WHERE is_published = true \
             ORDER BY date DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Every slug in use, for de-duplicating generated slugs.
    pub async fn all_slugs(pool: &PgPool) -> Result<HashSet<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT slug FROM news")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(slug,)| slug).collect())
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNews,
    ) -> Result<Option<News>, sqlx::Error> {
        let query = format!(
            "UPDATE news SET \
                 title = COALESCE($2, title), \
                 slug = COALESCE($3, slug), \
                 date = COALESCE($4, date), \
                 content_html = COALESCE($5, content_html), \
                 seo_title = COALESCE($6, seo_title), \
                 seo_description = COALESCE($7, seo_description), \
                 h1 = COALESCE($8, h1), \
                 seo_text_html = COALESCE($9, seo_text_html), \
                 is_published = COALESCE($10, is_published) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(input.date)
            .bind(&input.content_html)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .bind(&input.h1)
            .bind(&input.seo_text_html)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
