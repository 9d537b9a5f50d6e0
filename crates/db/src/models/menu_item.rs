//! Top navigation entries.

use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `menu_items` table.
///
/// The hero fields double as the hero banner of whichever list page the
/// item links to (e.g. `/news/`).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: DbId,
    pub title: String,
    pub url: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub is_external: bool,
    pub nofollow: bool,
    pub target_blank: bool,
    pub hero_image: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuItem {
    pub title: String,
    pub url: String,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub is_external: Option<bool>,
    pub nofollow: Option<bool>,
    pub target_blank: Option<bool>,
    pub hero_image: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMenuItem {
    pub title: Option<String>,
    pub url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub is_external: Option<bool>,
    pub nofollow: Option<bool>,
    pub target_blank: Option<bool>,
    pub hero_image: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
}
