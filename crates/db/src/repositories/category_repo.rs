//! Repository for the `categories` table.

use glavtrub_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CreateCategory, UpdateCategory};

const COLUMNS: &str = "id, name, slug, description_html, image_path, seo_title, \
                       seo_description, h1, seo_text_html, hero_image, hero_title, \
                       hero_subtitle, sort_order, is_active, created_at, updated_at";

pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a category under an already-resolved `slug`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCategory,
        slug: &str,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, slug, description_html, image_path, seo_title, \
                 seo_description, h1, seo_text_html, hero_image, hero_title, hero_subtitle, \
                 sort_order, is_active) \
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, ''), \
                 COALESCE($6, ''), COALESCE($7, ''), COALESCE($8, ''), COALESCE($9, ''), \
                 COALESCE($10, ''), COALESCE($11, ''), COALESCE($12, 0), COALESCE($13, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.description_html)
            .bind(&input.image_path)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .bind(&input.h1)
            .bind(&input.seo_text_html)
            .bind(&input.hero_image)
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE slug = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE slug = $1 AND is_active = true");
        sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY sort_order, name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    pub async fn list_active(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories WHERE is_active = true ORDER BY sort_order, name"
        );
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Whether another category already uses `slug`.
    pub async fn slug_taken(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let (taken,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE slug = $1 AND id IS DISTINCT FROM $2)",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(taken)
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                 name = COALESCE($2, name), \
                 slug = COALESCE($3, slug), \
                 description_html = COALESCE($4, description_html), \
                 image_path = COALESCE($5, image_path), \
                 seo_title = COALESCE($6, seo_title), \
                 seo_description = COALESCE($7, seo_description), \
                 h1 = COALESCE($8, h1), \
                 seo_text_html = COALESCE($9, seo_text_html), \
                 hero_image = COALESCE($10, hero_image), \
                 hero_title = COALESCE($11, hero_title), \
                 hero_subtitle = COALESCE($12, hero_subtitle), \
                 sort_order = COALESCE($13, sort_order), \
                 is_active = COALESCE($14, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description_html)
            .bind(&input.image_path)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .bind(&input.h1)
            .bind(&input.seo_text_html)
            .bind(&input.hero_image)
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category; product lines, size items and accessory blocks cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query(
            "DELETE FROM gallery_images WHERE owner_kind = 'product_line' \
             AND owner_id IN (SELECT id FROM product_lines WHERE category_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
