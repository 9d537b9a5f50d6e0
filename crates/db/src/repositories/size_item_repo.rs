//! Repository for the `size_items` table.

use glavtrub_core::catalog::sort_by_size;
use glavtrub_core::types::DbId;
use sqlx::PgPool;

use crate::models::size_item::{CreateSizeItem, SizeItem, UpdateSizeItem};

const COLUMNS: &str = "id, product_line_id, size_text, size_slug, full_name, sku, price, \
                       currency, unit, in_stock, image_path, discount_percent, hide_price, \
                       pipe_dxs, pressure, mass_per_m, min_bend_radius, max_len_coil, \
                       max_len_drum, created_at, updated_at";

pub struct SizeItemRepo;

impl SizeItemRepo {
    /// Insert a size item under an already-resolved `size_slug`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSizeItem,
        size_slug: &str,
    ) -> Result<SizeItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO size_items (product_line_id, size_text, size_slug, full_name, sku, \
                 price, currency, unit, in_stock, image_path, discount_percent, hide_price, \
                 pipe_dxs, pressure, mass_per_m, min_bend_radius, max_len_coil, max_len_drum) \
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, ''), COALESCE($6, 0), \
                 COALESCE($7, 'RUB'), COALESCE($8, 'шт'), COALESCE($9, true), \
                 COALESCE($10, ''), $11, $12, $13, $14, $15, $16, $17, $18) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SizeItem>(&query)
            .bind(input.product_line_id)
            .bind(&input.size_text)
            .bind(size_slug)
            .bind(&input.full_name)
            .bind(&input.sku)
            .bind(input.price)
            .bind(&input.currency)
            .bind(&input.unit)
            .bind(input.in_stock)
            .bind(&input.image_path)
            .bind(input.discount_percent)
            .bind(input.hide_price)
            .bind(&input.specs.pipe_dxs)
            .bind(&input.specs.pressure)
            .bind(&input.specs.mass_per_m)
            .bind(&input.specs.min_bend_radius)
            .bind(&input.specs.max_len_coil)
            .bind(&input.specs.max_len_drum)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SizeItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM size_items WHERE id = $1");
        sqlx::query_as::<_, SizeItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        product_line_id: DbId,
        size_slug: &str,
    ) -> Result<Option<SizeItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM size_items WHERE product_line_id = $1 AND size_slug = $2"
        );
        sqlx::query_as::<_, SizeItem>(&query)
            .bind(product_line_id)
            .bind(size_slug)
            .fetch_optional(pool)
            .await
    }

    /// Size items of a line in natural size order (`20/90` before `110/200`).
    pub async fn list_by_line(
        pool: &PgPool,
        product_line_id: DbId,
    ) -> Result<Vec<SizeItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM size_items WHERE product_line_id = $1");
        let mut items = sqlx::query_as::<_, SizeItem>(&query)
            .bind(product_line_id)
            .fetch_all(pool)
            .await?;
        sort_by_size(&mut items, |item| item.size_text.as_str());
        Ok(items)
    }

    pub async fn slug_taken(
        pool: &PgPool,
        product_line_id: DbId,
        size_slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let (taken,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM size_items \
             WHERE product_line_id = $1 AND size_slug = $2 AND id IS DISTINCT FROM $3)",
        )
        .bind(product_line_id)
        .bind(size_slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(taken)
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSizeItem,
    ) -> Result<Option<SizeItem>, sqlx::Error> {
        let query = format!(
            "UPDATE size_items SET \
                 product_line_id = COALESCE($2, product_line_id), \
                 size_text = COALESCE($3, size_text), \
                 size_slug = COALESCE($4, size_slug), \
                 full_name = COALESCE($5, full_name), \
                 sku = COALESCE($6, sku), \
                 price = COALESCE($7, price), \
                 currency = COALESCE($8, currency), \
                 unit = COALESCE($9, unit), \
                 in_stock = COALESCE($10, in_stock), \
                 image_path = COALESCE($11, image_path), \
                 discount_percent = CASE WHEN $14 THEN NULL \
                     ELSE COALESCE($12, discount_percent) END, \
                 hide_price = CASE WHEN $14 THEN NULL ELSE COALESCE($13, hide_price) END, \
                 pipe_dxs = COALESCE($15, pipe_dxs), \
                 pressure = COALESCE($16, pressure), \
                 mass_per_m = COALESCE($17, mass_per_m), \
                 min_bend_radius = COALESCE($18, min_bend_radius), \
                 max_len_coil = COALESCE($19, max_len_coil), \
                 max_len_drum = COALESCE($20, max_len_drum) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SizeItem>(&query)
            .bind(id)
            .bind(input.product_line_id)
            .bind(&input.size_text)
            .bind(&input.size_slug)
            .bind(&input.full_name)
            .bind(&input.sku)
            .bind(input.price)
            .bind(&input.currency)
            .bind(&input.unit)
            .bind(input.in_stock)
            .bind(&input.image_path)
            .bind(input.discount_percent)
            .bind(input.hide_price)
            .bind(input.inherit_pricing.unwrap_or(false))
            .bind(&input.pipe_dxs)
            .bind(&input.pressure)
            .bind(&input.mass_per_m)
            .bind(&input.min_bend_radius)
            .bind(&input.max_len_coil)
            .bind(&input.max_len_drum)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM size_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
