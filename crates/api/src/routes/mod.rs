pub mod auth;
pub mod catalog;
pub mod content;
pub mod health;
pub mod leads;
pub mod public;
pub mod system;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/me                                     current user (requires auth)
///
/// /admin/dashboard                             counters and recent leads
///
/// /admin/pages, /admin/menu, /admin/sections   site content (editor or admin)
/// /admin/news, /admin/services
/// /admin/gallery, /admin/documents
/// /admin/uploads/images
///
/// /admin/categories, /admin/product-lines      catalog tree (editor or admin)
/// /admin/size-items, /admin/accessory-blocks
///
/// /admin/leads                                 contact form submissions
///
/// /admin/redirects                             redirect rules (admin only)
/// /admin/settings                              key/value settings (admin only)
/// /admin/import/{kind}                         CSV import (admin only)
/// /admin/backup                                JSON export/restore (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/dashboard", get(handlers::dashboard::stats))
        .merge(content::router())
        .merge(catalog::router())
        .merge(leads::router())
        .merge(system::router());

    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin)
}
