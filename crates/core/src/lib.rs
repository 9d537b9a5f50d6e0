//! Domain logic for the glavtrub catalog site.
//!
//! Everything in this crate is synchronous and free of database or network
//! access, so it can be shared by the API server, the notification
//! dispatcher and the admin CLI.

pub mod captcha;
pub mod catalog;
pub mod csv_import;
pub mod error;
pub mod imaging;
pub mod redirect;
pub mod roles;
pub mod sanitize;
pub mod schema_org;
pub mod seo;
pub mod sitemap;
pub mod size_spec;
pub mod slug;
pub mod types;
