//! Static content pages (about, contacts, price, ...).

use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pages` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Page {
    pub id: DbId,
    pub slug: String,
    /// Public URL, always with leading and trailing slash.
    pub url_path: String,
    pub title: String,
    pub content_html: String,
    pub seo_title: String,
    pub seo_description: String,
    pub h1: String,
    pub seo_text_html: String,
    pub hero_image: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePage {
    pub slug: String,
    pub url_path: String,
    pub title: String,
    pub content_html: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub h1: Option<String>,
    pub seo_text_html: Option<String>,
    pub hero_image: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePage {
    pub slug: Option<String>,
    pub url_path: Option<String>,
    pub title: Option<String>,
    pub content_html: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub h1: Option<String>,
    pub seo_text_html: Option<String>,
    pub hero_image: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub is_published: Option<bool>,
}
