//! Repository for the `accessory_blocks` table.

use glavtrub_core::types::DbId;
use sqlx::PgPool;

use crate::models::accessory_block::{
    AccessoryBlock, CreateAccessoryBlock, UpdateAccessoryBlock,
};

const COLUMNS: &str = "id, product_line_id, name, description_html, image_path, table_html, \
                       use_outer_diameter, sort_order, is_active, created_at, updated_at";

pub struct AccessoryBlockRepo;

impl AccessoryBlockRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAccessoryBlock,
    ) -> Result<AccessoryBlock, sqlx::Error> {
        let query = format!(
            "INSERT INTO accessory_blocks (product_line_id, name, description_html, image_path, \
                 table_html, use_outer_diameter, sort_order, is_active) \
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, ''), \
                 COALESCE($6, false), COALESCE($7, 0), COALESCE($8, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessoryBlock>(&query)
            .bind(input.product_line_id)
            .bind(&input.name)
            .bind(&input.description_html)
            .bind(&input.image_path)
            .bind(&input.table_html)
            .bind(input.use_outer_diameter)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AccessoryBlock>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accessory_blocks WHERE id = $1");
        sqlx::query_as::<_, AccessoryBlock>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All blocks of a line (active and inactive), in display order.
    pub async fn list_by_line(
        pool: &PgPool,
        product_line_id: DbId,
    ) -> Result<Vec<AccessoryBlock>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM accessory_blocks \
             WHERE product_line_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, AccessoryBlock>(&query)
            .bind(product_line_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAccessoryBlock,
    ) -> Result<Option<AccessoryBlock>, sqlx::Error> {
        let query = format!(
            "UPDATE accessory_blocks SET \
                 name = COALESCE($2, name), \
                 description_html = COALESCE($3, description_html), \
                 image_path = COALESCE($4, image_path), \
                 table_html = COALESCE($5, table_html), \
                 use_outer_diameter = COALESCE($6, use_outer_diameter), \
                 sort_order = COALESCE($7, sort_order), \
                 is_active = COALESCE($8, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessoryBlock>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description_html)
            .bind(&input.image_path)
            .bind(&input.table_html)
            .bind(input.use_outer_diameter)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM accessory_blocks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
