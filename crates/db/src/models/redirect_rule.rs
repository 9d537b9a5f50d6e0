//! Stored redirect rules.

use glavtrub_core::redirect::{RedirectRule as Rule, RedirectStatus};
use glavtrub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `redirect_rules` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RedirectRule {
    pub id: DbId,
    pub from_path: String,
    pub to_path: String,
    /// 301 or 302.
    pub code: i32,
    pub is_active: bool,
    pub is_wildcard: bool,
    pub comment: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RedirectRule {
    /// Convert to the resolver's rule type.
    ///
    /// Rows with a code the resolver does not know are skipped.
    pub fn to_rule(&self) -> Option<Rule> {
        let status = RedirectStatus::from_code(self.code)?;
        Some(Rule::new(
            self.from_path.as_str(),
            self.to_path.as_str(),
            status,
            self.is_active,
            self.is_wildcard,
        ))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRedirectRule {
    pub from_path: String,
    pub to_path: String,
    pub code: Option<i32>,
    pub is_active: Option<bool>,
    pub is_wildcard: Option<bool>,
    pub comment: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRedirectRule {
    pub from_path: Option<String>,
    pub to_path: Option<String>,
    pub code: Option<i32>,
    pub is_active: Option<bool>,
    pub is_wildcard: Option<bool>,
    pub comment: Option<String>,
    pub sort_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn row(code: i32, is_wildcard: bool) -> RedirectRule {
        RedirectRule {
            id: 1,
            from_path: "/old/*".into(),
            to_path: "/new/*".into(),
            code,
            is_active: true,
            is_wildcard,
            comment: String::new(),
            sort_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn converts_to_resolver_rule() {
        let rule = row(302, true).to_rule().unwrap();
        assert!(matches!(rule, Rule::Wildcard(_)));
        assert_eq!(rule.paths().status, RedirectStatus::Found);

        assert!(matches!(row(301, false).to_rule(), Some(Rule::Exact(_))));
        assert!(row(307, false).to_rule().is_none());
    }
}
