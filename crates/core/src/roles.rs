//! Back-office roles.
//!
//! The string forms are what the `users.role` column and JWT claims carry.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Editor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Editor => ROLE_EDITOR,
        }
    }

    /// Pages, menu, sections, news, services, the catalog tree, galleries,
    /// documents and leads.
    pub fn can_edit_content(self) -> bool {
        matches!(self, Self::Admin | Self::Editor)
    }

    /// Redirect rules, settings, CSV import and backups.
    pub fn can_manage_site(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_EDITOR => Ok(Self::Editor),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_names() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("editor".parse::<Role>().unwrap(), Role::Editor);
        assert!("Admin".parse::<Role>().is_err());
        assert_eq!(Role::Editor.to_string(), "editor");
    }

    #[test]
    fn only_admins_manage_the_site() {
        assert!(Role::Editor.can_edit_content());
        assert!(!Role::Editor.can_manage_site());
        assert!(Role::Admin.can_edit_content());
        assert!(Role::Admin.can_manage_site());
    }
}
