//! Aggregate counters for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::{DashboardCounts, DashboardStats};
use crate::repositories::LeadRepo;

const RECENT_LEADS: i64 = 5;

pub struct DashboardRepo;

impl DashboardRepo {
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        let counts = sqlx::query_as::<_, DashboardCounts>(
            "SELECT \
                 (SELECT COUNT(*) FROM pages) AS pages, \
                 (SELECT COUNT(*) FROM categories) AS categories, \
                 (SELECT COUNT(*) FROM product_lines) AS product_lines, \
                 (SELECT COUNT(*) FROM size_items) AS size_items, \
                 (SELECT COUNT(*) FROM news) AS news, \
                 (SELECT COUNT(*) FROM leads WHERE status = 'new') AS new_leads, \
                 (SELECT COUNT(*) FROM redirect_rules WHERE is_active = true) AS active_redirects, \
                 (SELECT COUNT(*) FROM services) AS services",
        )
        .fetch_one(pool)
        .await?;

        let recent_leads = LeadRepo::recent(pool, RECENT_LEADS).await?;
        Ok(DashboardStats {
            counts,
            recent_leads,
        })
    }
}
