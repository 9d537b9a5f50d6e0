//! Accessory blocks: fitting tables attached to a product line.

use glavtrub_core::size_spec::AccessorySource;
use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `accessory_blocks` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AccessoryBlock {
    pub id: DbId,
    pub product_line_id: DbId,
    pub name: String,
    pub description_html: String,
    pub image_path: String,
    /// Sizing table; rows are filtered per size item on the public page.
    pub table_html: String,
    pub use_outer_diameter: bool,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AccessorySource for AccessoryBlock {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn table_html(&self) -> &str {
        &self.table_html
    }

    fn use_outer_diameter(&self) -> bool {
        self.use_outer_diameter
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccessoryBlock {
    pub product_line_id: DbId,
    pub name: String,
    pub description_html: Option<String>,
    pub image_path: Option<String>,
    pub table_html: Option<String>,
    pub use_outer_diameter: Option<bool>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccessoryBlock {
    pub name: Option<String>,
    pub description_html: Option<String>,
    pub image_path: Option<String>,
    pub table_html: Option<String>,
    pub use_outer_diameter: Option<bool>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
