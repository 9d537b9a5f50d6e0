//! Repository for the `menu_items` table.

use glavtrub_core::types::DbId;
use sqlx::PgPool;

use crate::models::menu_item::{CreateMenuItem, MenuItem, UpdateMenuItem};

const COLUMNS: &str = "id, title, url, sort_order, is_active, is_external, nofollow, \
                       target_blank, hero_image, hero_title, hero_subtitle, created_at, updated_at";

pub struct MenuItemRepo;

impl MenuItemRepo {
    pub async fn create(pool: &PgPool, input: &CreateMenuItem) -> Result<MenuItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO menu_items (title, url, sort_order, is_active, is_external, nofollow, \
                 target_blank, hero_image, hero_title, hero_subtitle) \
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, true), COALESCE($5, false), \
                 COALESCE($6, false), COALESCE($7, false), COALESCE($8, ''), \
                 COALESCE($9, ''), COALESCE($10, '')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(&input.title)
            .bind(&input.url)
            .bind(input.sort_order)
            .bind(input.is_active)
            .bind(input.is_external)
            .bind(input.nofollow)
            .bind(input.target_blank)
            .bind(&input.hero_image)
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM menu_items WHERE id = $1");
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// First active item linking to `url`; its hero fields decorate that page.
    pub async fn find_active_by_url(
        pool: &PgPool,
        url: &str,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menu_items \
             WHERE url = $1 AND is_active = true \
             ORDER BY sort_order, id LIMIT 1"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(url)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<MenuItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM menu_items ORDER BY sort_order, id");
        sqlx::query_as::<_, MenuItem>(&query).fetch_all(pool).await
    }

    pub async fn list_active(pool: &PgPool) -> Result<Vec<MenuItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menu_items WHERE is_active = true ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, MenuItem>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMenuItem,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "UPDATE menu_items SET \
                 title = COALESCE($2, title), \
                 url = COALESCE($3, url), \
                 sort_order = COALESCE($4, sort_order), \
                 is_active = COALESCE($5, is_active), \
                 is_external = COALESCE($6, is_external), \
                 nofollow = COALESCE($7, nofollow), \
                 target_blank = COALESCE($8, target_blank), \
                 hero_image = COALESCE($9, hero_image), \
                 hero_title = COALESCE($10, hero_title), \
                 hero_subtitle = COALESCE($11, hero_subtitle) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.url)
            .bind(input.sort_order)
            .bind(input.is_active)
            .bind(input.is_external)
            .bind(input.nofollow)
            .bind(input.target_blank)
            .bind(&input.hero_image)
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
