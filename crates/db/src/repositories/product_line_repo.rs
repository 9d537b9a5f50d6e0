//! Repository for the `product_lines` table.

use glavtrub_core::types::DbId;
use sqlx::PgPool;

use crate::models::product_line::{CreateProductLine, ProductLine, UpdateProductLine};

const COLUMNS: &str = "id, category_id, name, slug, description_html, image_path, \
                       seo_title, seo_description, h1, seo_text_html, hero_image, hero_title, \
                       hero_subtitle, gallery_interval, discount_percent, hide_price, \
                       sort_order, is_active, created_at, updated_at";

pub struct ProductLineRepo;

impl ProductLineRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateProductLine,
        slug: &str,
    ) -> Result<ProductLine, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_lines (category_id, name, slug, description_html, image_path, \
                 seo_title, seo_description, h1, seo_text_html, hero_image, hero_title, \
                 hero_subtitle, gallery_interval, discount_percent, hide_price, sort_order, \
                 is_active) \
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, ''), COALESCE($6, ''), \
                 COALESCE($7, ''), COALESCE($8, ''), COALESCE($9, ''), COALESCE($10, ''), \
                 COALESCE($11, ''), COALESCE($12, ''), COALESCE($13, 5), COALESCE($14, 0), \
                 COALESCE($15, false), COALESCE($16, 0), COALESCE($17, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductLine>(&query)
            .bind(input.category_id)
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
            .bind(input.gallery_interval)
            .bind(input.discount_percent)
            .bind(input.hide_price)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProductLine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_lines WHERE id = $1");
        sqlx::query_as::<_, ProductLine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        category_id: DbId,
        slug: &str,
    ) -> Result<Option<ProductLine>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM product_lines WHERE category_id = $1 AND slug = $2");
        sqlx::query_as::<_, ProductLine>(&query)
            .bind(category_id)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_active_by_slug(
        pool: &PgPool,
        category_id: DbId,
        slug: &str,
    ) -> Result<Option<ProductLine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_lines \
             WHERE category_id = $1 AND slug = $2 AND is_active = true"
        );
        sqlx::query_as::<_, ProductLine>(&query)
            .bind(category_id)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// All lines, optionally restricted to one category.
    pub async fn list(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<ProductLine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_lines \
             WHERE ($1::BIGINT IS NULL OR category_id = $1) \
             ORDER BY category_id, sort_order, name"
        );
        sqlx::query_as::<_, ProductLine>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_active_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<ProductLine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_lines \
             WHERE category_id = $1 AND is_active = true \
             ORDER BY sort_order, name"
        );
        sqlx::query_as::<_, ProductLine>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Whether another line in the same category already uses `slug`.
    pub async fn slug_taken(
        pool: &PgPool,
        category_id: DbId,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let (taken,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM product_lines \
             WHERE category_id = $1 AND slug = $2 AND id IS DISTINCT FROM $3)",
        )
        .bind(category_id)
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(taken)
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProductLine,
    ) -> Result<Option<ProductLine>, sqlx::Error> {
        let query = format!(
            "UPDATE product_lines SET \
                 category_id = COALESCE($2, category_id), \
                 name = COALESCE($3, name), \
                 slug = COALESCE($4, slug), \
                 description_html = COALESCE($5, description_html), \
                 image_path = COALESCE($6, image_path), \
                 seo_title = COALESCE($7, seo_title), \
                 seo_description = COALESCE($8, seo_description), \
                 h1 = COALESCE($9, h1), \
                 seo_text_html = COALESCE($10, seo_text_html), \
                 hero_image = COALESCE($11, hero_image), \
                 hero_title = COALESCE($12, hero_title), \
                 hero_subtitle = COALESCE($13, hero_subtitle), \
                 gallery_interval = COALESCE($14, gallery_interval), \
                 discount_percent = COALESCE($15, discount_percent), \
                 hide_price = COALESCE($16, hide_price), \
                 sort_order = COALESCE($17, sort_order), \
                 is_active = COALESCE($18, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductLine>(&query)
            .bind(id)
            .bind(input.category_id)
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
            .bind(input.gallery_interval)
            .bind(input.discount_percent)
            .bind(input.hide_price)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a line together with its gallery; size items and blocks cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM gallery_images WHERE owner_kind = 'product_line' AND owner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM product_lines WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
