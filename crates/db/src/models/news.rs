//! News articles.

use chrono::NaiveDate;
use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `news` table. Public URL: `/news/{slug}/`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub date: NaiveDate,
    pub content_html: String,
    pub seo_title: String,
    pub seo_description: String,
    pub h1: String,
    pub seo_text_html: String,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNews {
    pub title: String,
    pub slug: Option<String>,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub content_html: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub h1: Option<String>,
    pub seo_text_html: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<NaiveDate>,
    pub content_html: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub h1: Option<String>,
    pub seo_text_html: Option<String>,
    pub is_published: Option<bool>,
}
