//! Services offered by the company (delivery, installation, ...).

use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `services` table. Public URL: `/services/{slug}/`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Service {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content_html: String,
    pub image_path: String,
    pub seo_title: String,
    pub seo_description: String,
    pub h1: String,
    pub seo_text_html: String,
    pub hero_image: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub gallery_interval: i32,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateService {
    pub title: String,
    pub slug: Option<String>,
    pub content_html: Option<String>,
    pub image_path: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub h1: Option<String>,
    pub seo_text_html: Option<String>,
    pub hero_image: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub gallery_interval: Option<i32>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateService {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content_html: Option<String>,
    pub image_path: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub h1: Option<String>,
    pub seo_text_html: Option<String>,
    pub hero_image: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub gallery_interval: Option<i32>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
