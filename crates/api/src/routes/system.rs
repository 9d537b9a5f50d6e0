//! Admin-only routes: redirects, settings, CSV import and backups.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{import, redirects, settings};
use crate::state::AppState;

/// System routes, merged into `/admin`.
///
/// All routes require the `admin` role.
///
/// ```text
/// GET    /redirects                 -> redirects::list
/// POST   /redirects                 -> redirects::create
/// GET    /redirects/{id}            -> redirects::get
/// PUT    /redirects/{id}            -> redirects::update
/// DELETE /redirects/{id}            -> redirects::delete
///
/// GET    /settings                  -> settings::list
/// PUT    /settings                  -> settings::save
/// DELETE /settings/{key}            -> settings::delete
///
/// GET    /import/{kind}/template    -> import::template
/// POST   /import/{kind}             -> import::import_csv (multipart)
///
/// GET    /backup                    -> import::export_backup
/// POST   /backup                    -> import::import_backup (?clear_existing=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/redirects", get(redirects::list).post(redirects::create))
        .route(
            "/redirects/{id}",
            get(redirects::get)
                .put(redirects::update)
                .delete(redirects::delete),
        )
        .route("/settings", get(settings::list).put(settings::save))
        .route("/settings/{key}", delete(settings::delete))
        .route("/import/{kind}/template", get(import::template))
        .route("/import/{kind}", post(import::import_csv))
        .route(
            "/backup",
            get(import::export_backup).post(import::import_backup),
        )
}
