//! Request extractors and middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireStaff`] -- Requires `editor` or `admin` role.
//! - [`redirect`] -- Applies stored redirect rules before routing.
//! - [`cache`] -- Disables caching of dynamic responses.

pub mod auth;
pub mod cache;
pub mod rbac;
pub mod redirect;
