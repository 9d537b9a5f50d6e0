//! Top-level catalog categories.

use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table. Public URL: `/{slug}/`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description_html: String,
    pub image_path: String,
    pub seo_title: String,
    pub seo_description: String,
    pub h1: String,
    pub seo_text_html: String,
    pub hero_image: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Category {
    pub fn url_path(&self) -> String {
        format!("/{}/", self.slug)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    /// Generated from `name` when absent.
    pub slug: Option<String>,
    pub description_html: Option<String>,
    pub image_path: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub h1: Option<String>,
    pub seo_text_html: Option<String>,
    pub hero_image: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description_html: Option<String>,
    pub image_path: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub h1: Option<String>,
    pub seo_text_html: Option<String>,
    pub hero_image: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
