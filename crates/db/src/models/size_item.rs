//! Size items: one purchasable size of a product line.

use glavtrub_core::catalog::{display_price, effective_discount, effective_hide_price};
use glavtrub_core::csv_import::SizeItemSpecs;
use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::product_line::ProductLine;

/// A row from the `size_items` table.
/// Public URL: `/{category}/{line}/{size_slug}/`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SizeItem {
    pub id: DbId,
    pub product_line_id: DbId,
    pub size_text: String,
    pub size_slug: String,
    pub full_name: String,
    pub sku: String,
    pub price: f64,
    pub currency: String,
    pub unit: String,
    pub in_stock: bool,
    pub image_path: String,
    /// `None` inherits the product line discount.
    pub discount_percent: Option<f64>,
    /// `None` inherits the product line flag.
    pub hide_price: Option<bool>,
    pub pipe_dxs: String,
    pub pressure: String,
    pub mass_per_m: String,
    pub min_bend_radius: String,
    pub max_len_coil: String,
    pub max_len_drum: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Price figures after applying line-level defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectivePricing {
    pub discount_percent: f64,
    pub hide_price: bool,
    pub display_price: f64,
}

impl SizeItem {
    pub fn pricing(&self, line: &ProductLine) -> EffectivePricing {
        let discount_percent = effective_discount(self.discount_percent, line.discount_percent);
        EffectivePricing {
            discount_percent,
            hide_price: effective_hide_price(self.hide_price, line.hide_price),
            display_price: display_price(self.price, discount_percent),
        }
    }

    pub fn specs(&self) -> SizeItemSpecs {
        SizeItemSpecs {
            pipe_dxs: self.pipe_dxs.clone(),
            pressure: self.pressure.clone(),
            mass_per_m: self.mass_per_m.clone(),
            min_bend_radius: self.min_bend_radius.clone(),
            max_len_coil: self.max_len_coil.clone(),
            max_len_drum: self.max_len_drum.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSizeItem {
    pub product_line_id: DbId,
    pub size_text: String,
    /// Derived from `size_text` when absent.
    pub size_slug: Option<String>,
    pub full_name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub unit: Option<String>,
    pub in_stock: Option<bool>,
    pub image_path: Option<String>,
    pub discount_percent: Option<f64>,
    pub hide_price: Option<bool>,
    #[serde(flatten, default)]
    pub specs: SizeItemSpecs,
}

/// Patch for a size item.
///
/// `inherit_pricing = true` clears both overrides so the line values apply
/// again; it takes precedence over `discount_percent` / `hide_price`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSizeItem {
    pub product_line_id: Option<DbId>,
    pub size_text: Option<String>,
    pub size_slug: Option<String>,
    pub full_name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub unit: Option<String>,
    pub in_stock: Option<bool>,
    pub image_path: Option<String>,
    pub discount_percent: Option<f64>,
    pub hide_price: Option<bool>,
    pub inherit_pricing: Option<bool>,
    pub pipe_dxs: Option<String>,
    pub pressure: Option<String>,
    pub mass_per_m: Option<String>,
    pub min_bend_radius: Option<String>,
    pub max_len_coil: Option<String>,
    pub max_len_drum: Option<String>,
}
