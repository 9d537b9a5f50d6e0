//! Back-office accounts.

use glavtrub_core::error::CoreError;
use glavtrub_core::roles::Role;
use glavtrub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A `users` row. Holds the password hash, so it is never serialized;
/// handlers answer with [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// The stored role. The column is constrained to known names, so an
    /// error here means the schema and the code disagree.
    pub fn role(&self) -> Result<Role, CoreError> {
        self.role.parse()
    }

    /// Active accounts with a known role may sign in.
    pub fn can_sign_in(&self) -> bool {
        self.is_active && self.role().is_ok()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
            is_active: user.is_active,
            last_login_at: user.last_login_at,
        }
    }
}

/// Input for [`UserRepo::create`](crate::repositories::UserRepo::create).
/// The password must already be hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}
