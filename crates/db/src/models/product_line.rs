//! Product lines: a product family inside a category.

use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `product_lines` table. Public URL: `/{category}/{slug}/`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProductLine {
    pub id: DbId,
    pub category_id: DbId,
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
    /// Seconds between gallery slides.
    pub gallery_interval: i32,
    /// Default discount for all size items of the line, in percent.
    pub discount_percent: f64,
    pub hide_price: bool,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductLine {
    pub category_id: DbId,
    pub name: String,
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
    pub gallery_interval: Option<i32>,
    pub discount_percent: Option<f64>,
    pub hide_price: Option<bool>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductLine {
    pub category_id: Option<DbId>,
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
    pub gallery_interval: Option<i32>,
    pub discount_percent: Option<f64>,
    pub hide_price: Option<bool>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
