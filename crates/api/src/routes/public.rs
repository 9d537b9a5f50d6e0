//! Storefront routes mounted at the site root.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{public, seo_files, watermark};
use crate::state::AppState;

/// Public routes. Fixed paths win over the catch-all.
///
/// ```text
/// GET  /                        -> home
/// GET  /catalog/                -> catalog
/// GET  /services/               -> services
/// GET  /services/{slug}/        -> service_detail
/// GET  /news/                   -> news_list
/// GET  /news/{slug}/            -> news_detail
/// GET  /captcha/                -> captcha
/// POST /lead/                   -> submit_lead
/// GET  /sitemap.xml             -> sitemap
/// GET  /robots.txt              -> robots
/// GET  /wm/{kind}/{id}/         -> watermarked_image
/// GET  /{*path}                 -> resolve_path (pages, catalog tree)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(public::home))
        .route("/catalog/", get(public::catalog))
        .route("/services/", get(public::services))
        .route("/services/{slug}/", get(public::service_detail))
        .route("/news/", get(public::news_list))
        .route("/news/{slug}/", get(public::news_detail))
        .route("/captcha/", get(public::captcha))
        .route("/lead/", post(public::submit_lead))
        .route("/sitemap.xml", get(seo_files::sitemap))
        .route("/robots.txt", get(seo_files::robots))
        .route("/wm/{kind}/{id}/", get(watermark::watermarked_image))
        .route("/{*path}", get(public::resolve_path))
}
