//! Integration tests for the public storefront views.

mod common;

use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::StatusCode;
use common::{body_json, body_text, get, post_json_auth};
use sqlx::PgPool;

/// Seed one category with a line and a size item through the admin API.
async fn seed_catalog(app: &common::TestApp, token: &str) {
    let post = |uri: &'static str, body: serde_json::Value| {
        let router = app.app();
        let token = token.to_string();
        async move {
            let response = post_json_auth(router, uri, &token, body).await;
            assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
            body_json(response).await["data"].clone()
        }
    };

    let category = post(
        "/api/v1/admin/categories",
        serde_json::json!({ "name": "Трубы ПНД", "slug": "truby-pnd" }),
    )
    .await;
    let line = post(
        "/api/v1/admin/product-lines",
        serde_json::json!({
            "category_id": category["id"],
            "name": "ПЭ100 SDR17",
            "slug": "pe100-sdr17",
            "image_path": "/static/uploads/images/line.jpg"
        }),
    )
    .await;
    post(
        "/api/v1/admin/size-items",
        serde_json::json!({
            "product_line_id": line["id"],
            "size_text": "40/32",
            "sku": "PE-40",
            "price": 250.0
        }),
    )
    .await;
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn home_view_carries_menu_and_organization(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.app(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["view"], "home");
    assert_eq!(json["site_name"], "ГлавТрубТорг");
    assert_eq!(json["meta"]["canonical"], "https://glavtrubtorg.ru/");
    assert_eq!(json["menu"].as_array().unwrap().len(), 7);
    assert_eq!(json["meta"]["jsonld"][0]["@type"], "Organization");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn catalog_tree_resolves_by_path(pool: PgPool) {
    let editor = common::create_editor(&pool).await;
    let app = common::build_test_app(pool);
    seed_catalog(&app, &app.token(&editor)).await;

    let catalog = body_json(get(app.app(), "/catalog/").await).await;
    assert_eq!(catalog["view"], "catalog");
    assert_eq!(catalog["categories"][0]["slug"], "truby-pnd");
    assert_eq!(catalog["meta"]["breadcrumbs"][1]["name"], "Каталог");

    let category = body_json(get(app.app(), "/truby-pnd/").await).await;
    assert_eq!(category["view"], "category");
    assert_eq!(category["product_lines"][0]["slug"], "pe100-sdr17");
    assert_eq!(category["meta"]["h1"], "Трубы ПНД");

    let line = body_json(get(app.app(), "/truby-pnd/pe100-sdr17/").await).await;
    assert_eq!(line["view"], "product_line");
    assert_eq!(line["size_items"][0]["url"], "/truby-pnd/pe100-sdr17/40_32/");

    let item = body_json(get(app.app(), "/truby-pnd/pe100-sdr17/40_32/").await).await;
    assert_eq!(item["view"], "size_item");
    assert_eq!(item["meta"]["h1"], "ПЭ100 SDR17 40/32");
    assert_eq!(
        item["meta"]["canonical"],
        "https://glavtrubtorg.ru/truby-pnd/pe100-sdr17/40_32/"
    );
    let product = item["meta"]["jsonld"]
        .as_array()
        .unwrap()
        .iter()
        .find(|doc| doc["@type"] == "Product")
        .expect("product document");
    assert_eq!(product["sku"], "PE-40");
    assert_eq!(product["brand"]["name"], "Трубы ПНД");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn unknown_and_reserved_paths_are_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    for path in ["/no-such-category/", "/admin/", "/a/b/c/d/"] {
        let response = get(app.app(), path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {path}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn seeded_page_is_served(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.app(), "/about/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["view"], "page");
    assert_eq!(json["page"]["title"], "О компании");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn missing_trailing_slash_redirects(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.app(), "/about?x=1").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[LOCATION], "/about/?x=1");

    // File-like paths are left alone.
    let response = get(app.app(), "/robots.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn sitemap_lists_catalog_and_pages(pool: PgPool) {
    let editor = common::create_editor(&pool).await;
    let app = common::build_test_app(pool);
    seed_catalog(&app, &app.token(&editor)).await;

    let response = get(app.app(), "/sitemap.xml").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/xml"));
    let xml = body_text(response).await;

    assert!(xml.contains("<loc>https://glavtrubtorg.ru/about/</loc>"));
    assert!(xml.contains("<loc>https://glavtrubtorg.ru/catalog/</loc>"));
    assert!(xml.contains("<loc>https://glavtrubtorg.ru/truby-pnd/pe100-sdr17/40_32/</loc>"));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn robots_points_at_sitemap(pool: PgPool) {
    let app = common::build_test_app(pool);

    let text = body_text(get(app.app(), "/robots.txt").await).await;
    assert!(text.contains("Sitemap: https://glavtrubtorg.ru/sitemap.xml"));
}
