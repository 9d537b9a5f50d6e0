//! Shared query parameter types for API handlers.

use glavtrub_core::types::DbId;
use serde::Deserialize;

/// `?category_id=` filter for product line listings.
#[derive(Debug, Deserialize)]
pub struct CategoryFilter {
    pub category_id: Option<DbId>,
}

/// `?product_line_id=` filter for size items and accessory blocks.
#[derive(Debug, Deserialize)]
pub struct ProductLineFilter {
    pub product_line_id: DbId,
}

/// `?kind=&owner_id=` selector for gallery listings.
#[derive(Debug, Deserialize)]
pub struct GalleryFilter {
    pub kind: String,
    pub owner_id: Option<DbId>,
}

/// `?clear_existing=` flag for backup restores.
#[derive(Debug, Deserialize)]
pub struct RestoreParams {
    #[serde(default)]
    pub clear_existing: bool,
}
