//! Editable SEO and hero settings for the fixed list sections.

use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Section keys the site knows about, with their default titles.
pub const SECTION_TITLES: &[(&str, &str)] = &[
    ("index", "Главная страница"),
    ("news", "Раздел новостей"),
    ("catalog", "Каталог"),
    ("services", "Раздел услуг"),
];

/// Default title for a section key, falling back to the key itself.
pub fn default_section_title(key: &str) -> &str {
    SECTION_TITLES
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(key, |(_, title)| title)
}

/// A row from the `site_sections` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SiteSection {
    pub id: DbId,
    pub section_key: String,
    pub title: String,
    pub content_html: String,
    pub seo_title: String,
    pub seo_description: String,
    pub h1: String,
    pub seo_text_html: String,
    pub hero_image: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub gallery_interval: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSiteSection {
    pub title: Option<String>,
    pub content_html: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub h1: Option<String>,
    pub seo_text_html: Option<String>,
    pub hero_image: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub gallery_interval: Option<i32>,
}
