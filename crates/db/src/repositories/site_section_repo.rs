//! Repository for the `site_sections` table.

use sqlx::PgPool;

use crate::models::site_section::{default_section_title, SiteSection, UpdateSiteSection};

const COLUMNS: &str = "id, section_key, title, content_html, seo_title, seo_description, h1, \
                       seo_text_html, hero_image, hero_title, hero_subtitle, gallery_interval, \
                       created_at, updated_at";

pub struct SiteSectionRepo;

impl SiteSectionRepo {
    pub async fn find_by_key(
        pool: &PgPool,
        key: &str,
    ) -> Result<Option<SiteSection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_sections WHERE section_key = $1");
        sqlx::query_as::<_, SiteSection>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a section, creating it with its default title on first access.
    pub async fn get_or_create(pool: &PgPool, key: &str) -> Result<SiteSection, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_sections (section_key, title) VALUES ($1, $2) \
             ON CONFLICT (section_key) DO UPDATE SET section_key = EXCLUDED.section_key \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSection>(&query)
            .bind(key)
            .bind(default_section_title(key))
            .fetch_one(pool)
            .await
    }

    /// Patch a section, creating the row first if it does not exist yet.
    pub async fn upsert(
        pool: &PgPool,
        key: &str,
        input: &UpdateSiteSection,
    ) -> Result<SiteSection, sqlx::Error> {
        let section = Self::get_or_create(pool, key).await?;
        let query = format!(
            "UPDATE site_sections SET \
                 title = COALESCE($2, title), \
                 content_html = COALESCE($3, content_html), \
                 seo_title = COALESCE($4, seo_title), \
                 seo_description = COALESCE($5, seo_description), \
                 h1 = COALESCE($6, h1), \
                 seo_text_html = COALESCE($7, seo_text_html), \
                 hero_image = COALESCE($8, hero_image), \
                 hero_title = COALESCE($9, hero_title), \
                 hero_subtitle = COALESCE($10, hero_subtitle), \
                 gallery_interval = COALESCE($11, gallery_interval) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSection>(&query)
            .bind(section.id)
            .bind(&input.title)
            .bind(&input.content_html)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .bind(&input.h1)
            .bind(&input.seo_text_html)
            .bind(&input.hero_image)
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(input.gallery_interval)
            .fetch_one(pool)
            .await
    }
}
