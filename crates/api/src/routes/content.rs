//! Route definitions for site content under `/admin`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{documents, gallery, menu, news, pages, sections, services, uploads};
use crate::state::AppState;

/// Content routes, merged into `/admin`.
///
/// All routes require the `editor` or `admin` role (enforced by handler
/// extractors).
///
/// ```text
/// GET    /pages                 -> pages::list
/// POST   /pages                 -> pages::create
/// GET    /pages/{id}            -> pages::get
/// PUT    /pages/{id}            -> pages::update
/// DELETE /pages/{id}            -> pages::delete
///
/// GET    /menu                  -> menu::list
/// POST   /menu                  -> menu::create
/// GET    /menu/{id}             -> menu::get
/// PUT    /menu/{id}             -> menu::update
/// DELETE /menu/{id}             -> menu::delete
///
/// GET    /sections              -> sections::list
/// GET    /sections/{key}        -> sections::get
/// PUT    /sections/{key}        -> sections::update
///
/// GET    /news                  -> news::list
/// POST   /news                  -> news::create
/// GET    /news/{id}             -> news::get
/// PUT    /news/{id}             -> news::update
/// DELETE /news/{id}             -> news::delete
///
/// GET    /services              -> services::list
/// POST   /services              -> services::create
/// GET    /services/{id}         -> services::get
/// PUT    /services/{id}         -> services::update
/// DELETE /services/{id}         -> services::delete
///
/// GET    /gallery               -> gallery::list (?kind=&owner_id=)
/// POST   /gallery               -> gallery::create
/// PUT    /gallery/{id}          -> gallery::update
/// DELETE /gallery/{id}          -> gallery::delete
///
/// GET    /documents             -> documents::list
/// POST   /documents             -> documents::upload (multipart)
/// PUT    /documents/{id}        -> documents::update
/// DELETE /documents/{id}        -> documents::delete
///
/// POST   /uploads/images        -> uploads::upload_image (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pages", get(pages::list).post(pages::create))
        .route(
            "/pages/{id}",
            get(pages::get).put(pages::update).delete(pages::delete),
        )
        .route("/menu", get(menu::list).post(menu::create))
        .route(
            "/menu/{id}",
            get(menu::get).put(menu::update).delete(menu::delete),
        )
        .route("/sections", get(sections::list))
        .route("/sections/{key}", get(sections::get).put(sections::update))
        .route("/news", get(news::list).post(news::create))
        .route(
            "/news/{id}",
            get(news::get).put(news::update).delete(news::delete),
        )
        .route("/services", get(services::list).post(services::create))
        .route(
            "/services/{id}",
            get(services::get)
                .put(services::update)
                .delete(services::delete),
        )
        .route("/gallery", get(gallery::list).post(gallery::create))
        .route(
            "/gallery/{id}",
            axum::routing::put(gallery::update).delete(gallery::delete),
        )
        .route("/documents", get(documents::list).post(documents::upload))
        .route(
            "/documents/{id}",
            axum::routing::put(documents::update).delete(documents::delete),
        )
        .route("/uploads/images", post(uploads::upload_image))
}
