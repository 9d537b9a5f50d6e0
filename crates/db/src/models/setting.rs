//! Key/value site settings.

use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const SETTING_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const SETTING_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const SETTING_WATERMARK_IMAGE: &str = "WATERMARK_IMAGE";
pub const SETTING_WATERMARK_OPACITY: &str = "WATERMARK_OPACITY";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Setting {
    pub id: DbId,
    pub key: String,
    pub value: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One entry of a bulk settings save.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingValue {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}
