//! Route definitions for the catalog tree under `/admin`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{accessory_blocks, categories, product_lines, size_items};
use crate::state::AppState;

/// Catalog routes, merged into `/admin`.
///
/// ```text
/// GET    /categories                 -> categories::list
/// POST   /categories                 -> categories::create
/// GET    /categories/{id}            -> categories::get
/// PUT    /categories/{id}            -> categories::update
/// DELETE /categories/{id}            -> categories::delete
///
/// GET    /product-lines              -> product_lines::list (?category_id=)
/// POST   /product-lines              -> product_lines::create
/// GET    /product-lines/{id}         -> product_lines::get
/// PUT    /product-lines/{id}         -> product_lines::update
/// DELETE /product-lines/{id}         -> product_lines::delete
///
/// GET    /size-items                 -> size_items::list (?product_line_id=)
/// POST   /size-items                 -> size_items::create
/// GET    /size-items/{id}            -> size_items::get
/// PUT    /size-items/{id}            -> size_items::update
/// DELETE /size-items/{id}            -> size_items::delete
///
/// GET    /accessory-blocks           -> accessory_blocks::list (?product_line_id=)
/// POST   /accessory-blocks           -> accessory_blocks::create
/// GET    /accessory-blocks/{id}      -> accessory_blocks::get
/// PUT    /accessory-blocks/{id}      -> accessory_blocks::update
/// DELETE /accessory-blocks/{id}      -> accessory_blocks::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            get(categories::get)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route(
            "/product-lines",
            get(product_lines::list).post(product_lines::create),
        )
        .route(
            "/product-lines/{id}",
            get(product_lines::get)
                .put(product_lines::update)
                .delete(product_lines::delete),
        )
        .route("/size-items", get(size_items::list).post(size_items::create))
        .route(
            "/size-items/{id}",
            get(size_items::get)
                .put(size_items::update)
                .delete(size_items::delete),
        )
        .route(
            "/accessory-blocks",
            get(accessory_blocks::list).post(accessory_blocks::create),
        )
        .route(
            "/accessory-blocks/{id}",
            get(accessory_blocks::get)
                .put(accessory_blocks::update)
                .delete(accessory_blocks::delete),
        )
}
