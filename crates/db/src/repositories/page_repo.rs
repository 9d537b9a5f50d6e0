//! Repository for the `pages` table.

use glavtrub_core::types::DbId;
use sqlx::PgPool;

use crate::models::page::{CreatePage, Page, UpdatePage};

const COLUMNS: &str = "id, slug, url_path, title, content_html, seo_title, seo_description, \
                       h1, seo_text_html, hero_image, hero_title, hero_subtitle, is_published, \
                       created_at, updated_at";

/// Provides CRUD operations for static pages.
pub struct PageRepo;

impl PageRepo {
    pub async fn create(pool: &PgPool, input: &CreatePage) -> Result<Page, sqlx::Error> {
        let query = format!(
            "INSERT INTO pages (slug, url_path, title, content_html, seo_title, seo_description, \
                 h1, seo_text_html, hero_image, hero_title, hero_subtitle, is_published) \
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, ''), COALESCE($6, ''), \
                 COALESCE($7, ''), COALESCE($8, ''), COALESCE($9, ''), COALESCE($10, ''), \
                 COALESCE($11, ''), COALESCE($12, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(&input.slug)
            .bind(&input.url_path)
            .bind(&input.title)
            .bind(&input.content_html)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .bind(&input.h1)
            .bind(&input.seo_text_html)
            .bind(&input.hero_image)
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Published page served at `url_path` (e.g. `/about/`).
    pub async fn find_published_by_url(
        pool: &PgPool,
        url_path: &str,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM pages WHERE url_path = $1 AND is_published = true");
        sqlx::query_as::<_, Page>(&query)
            .bind(url_path)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages ORDER BY title");
        sqlx::query_as::<_, Page>(&query).fetch_all(pool).await
    }

    pub async fn list_published(pool: &PgPool) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE is_published = true ORDER BY id");
        sqlx::query_as::<_, Page>(&query).fetch_all(pool).await
    }

    /// Update a page. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePage,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "UPDATE pages SET \
                 slug = COALESCE($2, slug), \
                 url_path = COALESCE($3, url_path), \
                 title = COALESCE($4, title), \
                 content_html = COALESCE($5, content_html), \
                 seo_title = COALESCE($6, seo_title), \
                 seo_description = COALESCE($7, seo_description), \
                 h1 = COALESCE($8, h1), \
                 seo_text_html = COALESCE($9, seo_text_html), \
                 hero_image = COALESCE($10, hero_image), \
                 hero_title = COALESCE($11, hero_title), \
                 hero_subtitle = COALESCE($12, hero_subtitle), \
                 is_published = COALESCE($13, is_published) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.url_path)
            .bind(&input.title)
            .bind(&input.content_html)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .bind(&input.h1)
            .bind(&input.seo_text_html)
            .bind(&input.hero_image)
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
