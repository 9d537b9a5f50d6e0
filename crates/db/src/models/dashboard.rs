//! Admin dashboard counters.

use serde::Serialize;
use sqlx::FromRow;

use super::lead::Lead;

#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct DashboardCounts {
    pub pages: i64,
    pub categories: i64,
    pub product_lines: i64,
    pub size_items: i64,
    pub news: i64,
    /// Leads still in status `new`.
    pub new_leads: i64,
    pub active_redirects: i64,
    pub services: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    #[serde(flatten)]
    pub counts: DashboardCounts,
    pub recent_leads: Vec<Lead>,
}
