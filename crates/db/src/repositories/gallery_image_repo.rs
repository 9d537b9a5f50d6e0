//! Repository for the `gallery_images` table.
//!
//! At most one image per gallery carries `is_main`; setting it on one image
//! clears it on the rest of the same gallery.

use glavtrub_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::gallery_image::{
    CreateGalleryImage, GalleryImage, GalleryOwner, UpdateGalleryImage,
};

const COLUMNS: &str = "id, owner_kind, owner_id, image_path, alt_text, title_text, caption, \
                       is_main, sort_order, rotation, no_watermark, created_at, updated_at";

pub struct GalleryImageRepo;

impl GalleryImageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryImage,
    ) -> Result<GalleryImage, sqlx::Error> {
        let mut tx = pool.begin().await?;
        if input.is_main == Some(true) {
            Self::clear_main(&mut tx, input.owner_kind.as_str(), input.owner_id).await?;
        }

        let query = format!(
            "INSERT INTO gallery_images (owner_kind, owner_id, image_path, alt_text, title_text, \
                 caption, is_main, sort_order, rotation, no_watermark) \
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, ''), COALESCE($6, ''), \
                 COALESCE($7, false), \
                 COALESCE($8, (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM gallery_images \
                     WHERE owner_kind = $1 AND owner_id IS NOT DISTINCT FROM $2)), \
                 COALESCE($9, 0), COALESCE($10, false)) \
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, GalleryImage>(&query)
            .bind(input.owner_kind.as_str())
            .bind(input.owner_id)
            .bind(&input.image_path)
            .bind(&input.alt_text)
            .bind(&input.title_text)
            .bind(&input.caption)
            .bind(input.is_main)
            .bind(input.sort_order)
            .bind(input.rotation)
            .bind(input.no_watermark)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Image `id` only if it belongs to a gallery of `owner`.
    pub async fn find_for_kind(
        pool: &PgPool,
        owner: GalleryOwner,
        id: DbId,
    ) -> Result<Option<GalleryImage>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM gallery_images WHERE id = $1 AND owner_kind = $2");
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(id)
            .bind(owner.as_str())
            .fetch_optional(pool)
            .await
    }

    /// One gallery in display order. `owner_id` is `None` for the home gallery.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner: GalleryOwner,
        owner_id: Option<DbId>,
    ) -> Result<Vec<GalleryImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery_images \
             WHERE owner_kind = $1 AND owner_id IS NOT DISTINCT FROM $2 \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(owner.as_str())
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryImage,
    ) -> Result<Option<GalleryImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_main == Some(true) {
            let owner: Option<(String, Option<DbId>)> =
                sqlx::query_as("SELECT owner_kind, owner_id FROM gallery_images WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?;
            let Some((kind, owner_id)) = owner else {
                return Ok(None);
            };
            Self::clear_main(&mut tx, &kind, owner_id).await?;
        }

        let query = format!(
            "UPDATE gallery_images SET \
                 alt_text = COALESCE($2, alt_text), \
                 title_text = COALESCE($3, title_text), \
                 caption = COALESCE($4, caption), \
                 is_main = COALESCE($5, is_main), \
                 sort_order = COALESCE($6, sort_order), \
                 rotation = COALESCE($7, rotation), \
                 no_watermark = COALESCE($8, no_watermark) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, GalleryImage>(&query)
            .bind(id)
            .bind(&input.alt_text)
            .bind(&input.title_text)
            .bind(&input.caption)
            .bind(input.is_main)
            .bind(input.sort_order)
            .bind(input.rotation)
            .bind(input.no_watermark)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Delete an image row, returning it so the caller can remove the file.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<GalleryImage>, sqlx::Error> {
        let query = format!("DELETE FROM gallery_images WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    async fn clear_main(
        conn: &mut PgConnection,
        owner_kind: &str,
        owner_id: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE gallery_images SET is_main = false \
             WHERE owner_kind = $1 AND owner_id IS NOT DISTINCT FROM $2 AND is_main = true",
        )
        .bind(owner_kind)
        .bind(owner_id)
        .execute(conn)
        .await?;
        Ok(())
    }
}
