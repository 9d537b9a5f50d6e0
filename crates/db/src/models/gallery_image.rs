//! Gallery images for the home page, services and product lines.

use std::fmt;
use std::str::FromStr;

use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Which gallery an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryOwner {
    Home,
    Service,
    ProductLine,
}

impl GalleryOwner {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Service => "service",
            Self::ProductLine => "product_line",
        }
    }

    /// Home images have no owner row; the others require one.
    pub fn requires_owner_id(self) -> bool {
        !matches!(self, Self::Home)
    }
}

impl fmt::Display for GalleryOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GalleryOwner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Self::Home),
            "service" => Ok(Self::Service),
            "product_line" => Ok(Self::ProductLine),
            other => Err(format!("Unknown gallery kind: {other}")),
        }
    }
}

/// A row from the `gallery_images` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: DbId,
    /// One of `home`, `service`, `product_line`.
    pub owner_kind: String,
    pub owner_id: Option<DbId>,
    pub image_path: String,
    pub alt_text: String,
    pub title_text: String,
    pub caption: String,
    pub is_main: bool,
    pub sort_order: i32,
    /// Clockwise rotation in degrees: 0, 90, 180 or 270.
    pub rotation: i32,
    pub no_watermark: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl GalleryImage {
    /// Public URL that serves the image through the watermark endpoint.
    pub fn watermarked_url(&self) -> String {
        format!("/wm/{}/{}/", self.owner_kind, self.id)
    }
}

/// The image flagged `is_main`, else the first by sort order.
pub fn main_image(images: &[GalleryImage]) -> Option<&GalleryImage> {
    images
        .iter()
        .find(|img| img.is_main)
        .or_else(|| images.first())
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGalleryImage {
    pub owner_kind: GalleryOwner,
    pub owner_id: Option<DbId>,
    pub image_path: String,
    pub alt_text: Option<String>,
    pub title_text: Option<String>,
    pub caption: Option<String>,
    pub is_main: Option<bool>,
    pub sort_order: Option<i32>,
    pub rotation: Option<i32>,
    pub no_watermark: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGalleryImage {
    pub alt_text: Option<String>,
    pub title_text: Option<String>,
    pub caption: Option<String>,
    pub is_main: Option<bool>,
    pub sort_order: Option<i32>,
    pub rotation: Option<i32>,
    pub no_watermark: Option<bool>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn image(id: DbId, is_main: bool) -> GalleryImage {
        GalleryImage {
            id,
            owner_kind: "service".into(),
            owner_id: Some(1),
            image_path: format!("/static/uploads/{id}.jpg"),
            alt_text: String::new(),
            title_text: String::new(),
            caption: String::new(),
            is_main,
            sort_order: id as i32,
            rotation: 0,
            no_watermark: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_kind_parses() {
        assert_eq!("product_line".parse::<GalleryOwner>(), Ok(GalleryOwner::ProductLine));
        assert!("gallery".parse::<GalleryOwner>().is_err());
        assert!(!GalleryOwner::Home.requires_owner_id());
        assert!(GalleryOwner::Service.requires_owner_id());
    }

    #[test]
    fn main_image_prefers_flag() {
        let images = vec![image(1, false), image(2, true)];
        assert_eq!(main_image(&images).map(|i| i.id), Some(2));

        let images = vec![image(3, false), image(4, false)];
        assert_eq!(main_image(&images).map(|i| i.id), Some(3));
        assert!(main_image(&[]).is_none());
    }

    #[test]
    fn watermark_url() {
        assert_eq!(image(7, false).watermarked_url(), "/wm/service/7/");
    }
}
