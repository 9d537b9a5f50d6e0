//! JSON view models for the public storefront.
//!
//! Every public page is a [`PublicPage`]: shared chrome (menu, SEO metadata,
//! hero banner) plus a page-specific body flattened into the same object.

use glavtrub_core::schema_org::breadcrumb_jsonld;
use glavtrub_core::seo::{og_tags, Breadcrumb, PageSeo, SiteInfo};
use glavtrub_db::models::accessory_block::AccessoryBlock;
use glavtrub_db::models::gallery_image::GalleryImage;
use glavtrub_db::models::menu_item::MenuItem;
use glavtrub_db::models::size_item::{EffectivePricing, SizeItem};
use serde::Serialize;
use serde_json::Value;

/// A single Open Graph `<meta property=... content=...>` pair.
#[derive(Debug, Clone, Serialize)]
pub struct OgTag {
    pub property: &'static str,
    pub content: String,
}

/// Head metadata of a page.
#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    #[serde(flatten)]
    pub seo: PageSeo,
    pub canonical: String,
    pub og: Vec<OgTag>,
    pub breadcrumbs: Vec<Breadcrumb>,
    /// JSON-LD documents to embed, breadcrumbs first.
    pub jsonld: Vec<Value>,
}

impl Meta {
    /// Metadata for the page at `path`. A breadcrumb list document is added
    /// whenever there is a trail.
    pub fn new(
        site: &SiteInfo,
        seo: PageSeo,
        path: &str,
        breadcrumbs: Vec<Breadcrumb>,
        image: Option<&str>,
    ) -> Self {
        let canonical = site.canonical_url(path);
        let og = og_tags(site, &seo.title, &seo.description, &canonical, image)
            .into_iter()
            .map(|(property, content)| OgTag { property, content })
            .collect();
        let jsonld = if breadcrumbs.is_empty() {
            Vec::new()
        } else {
            vec![breadcrumb_jsonld(site, &breadcrumbs)]
        };
        Self {
            seo,
            canonical,
            og,
            breadcrumbs,
            jsonld,
        }
    }

    pub fn with_jsonld(mut self, doc: Value) -> Self {
        self.jsonld.push(doc);
        self
    }
}

/// Banner shown at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub image: String,
    pub title: String,
    pub subtitle: String,
}

impl Hero {
    /// `None` when there is no image; the title falls back to `default_title`.
    pub fn from_parts(image: &str, title: &str, subtitle: &str, default_title: &str) -> Option<Self> {
        if image.trim().is_empty() {
            return None;
        }
        let title = if title.trim().is_empty() {
            default_title
        } else {
            title
        };
        Some(Self {
            image: image.to_string(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        })
    }
}

/// Menu entry as rendered in the site header.
#[derive(Debug, Clone, Serialize)]
pub struct MenuLink {
    pub title: String,
    pub url: String,
    pub is_external: bool,
    pub nofollow: bool,
    pub target_blank: bool,
}

impl From<&MenuItem> for MenuLink {
    fn from(item: &MenuItem) -> Self {
        Self {
            title: item.title.clone(),
            url: item.url.clone(),
            is_external: item.is_external,
            nofollow: item.nofollow,
            target_blank: item.target_blank,
        }
    }
}

/// Envelope for every storefront response.
#[derive(Debug, Serialize)]
pub struct PublicPage<T: Serialize> {
    /// Page template identifier, e.g. `category` or `size_item`.
    pub view: &'static str,
    pub site_name: String,
    pub menu: Vec<MenuLink>,
    pub meta: Meta,
    pub hero: Option<Hero>,
    #[serde(flatten)]
    pub body: T,
}

/// Gallery image with the URL that serves it watermarked.
#[derive(Debug, Clone, Serialize)]
pub struct GallerySlide {
    pub id: i64,
    pub url: String,
    pub alt_text: String,
    pub title_text: String,
    pub caption: String,
    pub is_main: bool,
}

impl From<&GalleryImage> for GallerySlide {
    fn from(image: &GalleryImage) -> Self {
        Self {
            id: image.id,
            url: image.watermarked_url(),
            alt_text: image.alt_text.clone(),
            title_text: image.title_text.clone(),
            caption: image.caption.clone(),
            is_main: image.is_main,
        }
    }
}

pub fn slides(images: &[GalleryImage]) -> Vec<GallerySlide> {
    images.iter().map(GallerySlide::from).collect()
}

/// Size item row with its resolved price and page URL.
#[derive(Debug, Clone, Serialize)]
pub struct SizeItemCard {
    #[serde(flatten)]
    pub item: SizeItem,
    pub url: String,
    pub pricing: EffectivePricing,
}

/// Accessory block with its table cut down to the rows for one size.
#[derive(Debug, Clone, Serialize)]
pub struct AccessoryView {
    pub id: i64,
    pub name: String,
    pub description_html: String,
    pub image_path: String,
    pub table_html: String,
}

impl AccessoryView {
    pub fn new(block: &AccessoryBlock, table_html: String) -> Self {
        Self {
            id: block.id,
            name: block.name.clone(),
            description_html: block.description_html.clone(),
            image_path: block.image_path.clone(),
            table_html,
        }
    }
}
