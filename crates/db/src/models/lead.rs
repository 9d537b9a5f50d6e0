//! Contact-form submissions ("leads").

use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const LEAD_STATUS_NEW: &str = "new";

/// Allowed values of `leads.status`.
pub const LEAD_STATUSES: &[&str] = &[LEAD_STATUS_NEW, "in_progress", "done", "spam"];

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lead {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
    pub source: String,
    pub status: String,
    pub page_url: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_term: String,
    pub utm_content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lead {
    /// Non-empty UTM parameters as `(name, value)` pairs, in canonical order.
    pub fn utm_params(&self) -> Vec<(&'static str, String)> {
        self.utm().present()
    }

    pub fn utm(&self) -> UtmParams {
        UtmParams {
            utm_source: self.utm_source.clone(),
            utm_medium: self.utm_medium.clone(),
            utm_campaign: self.utm_campaign.clone(),
            utm_term: self.utm_term.clone(),
            utm_content: self.utm_content.clone(),
        }
    }
}

/// Campaign tags captured from the landing URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtmParams {
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_term: String,
    pub utm_content: String,
}

impl UtmParams {
    pub fn present(&self) -> Vec<(&'static str, String)> {
        [
            ("utm_source", &self.utm_source),
            ("utm_medium", &self.utm_medium),
            ("utm_campaign", &self.utm_campaign),
            ("utm_term", &self.utm_term),
            ("utm_content", &self.utm_content),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k, v.clone()))
        .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLead {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
    pub source: Option<String>,
    pub page_url: String,
    #[serde(flatten)]
    pub utm: UtmParams,
}

/// Query parameters for `GET /api/v1/admin/leads`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_present_utm_params() {
        let utm = UtmParams {
            utm_source: "yandex".into(),
            utm_campaign: "pipes".into(),
            ..Default::default()
        };
        assert_eq!(
            utm.present(),
            vec![
                ("utm_source", "yandex".to_string()),
                ("utm_campaign", "pipes".to_string())
            ]
        );
        assert!(UtmParams::default().present().is_empty());
    }
}
