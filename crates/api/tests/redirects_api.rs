//! Integration tests for stored redirect rules.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{body_json, get, post_json_auth};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn exact_rule_redirects_and_keeps_query(pool: PgPool) {
    let admin = common::create_admin(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&admin);

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/redirects",
        &token,
        serde_json::json!({ "from_path": "old-price", "to_path": "/price/" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let rule = body_json(response).await["data"].clone();
    assert_eq!(rule["from_path"], "/old-price/");
    assert_eq!(rule["code"], 301);

    // Matches with and without the trailing slash.
    for path in ["/old-price/", "/old-price"] {
        let response = get(app.app(), path).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY, "GET {path}");
        assert_eq!(response.headers()[LOCATION], "/price/");
    }

    let response = get(app.app(), "/old-price/?utm_source=ya").await;
    assert_eq!(response.headers()[LOCATION], "/price/?utm_source=ya");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn wildcard_rule_carries_the_tail(pool: PgPool) {
    let admin = common::create_admin(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&admin);

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/redirects",
        &token,
        serde_json::json!({
            "from_path": "/shop/*",
            "to_path": "/catalog/*",
            "code": 302,
            "is_wildcard": true
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app.app(), "/shop/pnd/40").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "/catalog/pnd/40/");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn legacy_catalog_urls_move_to_the_root(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.app(), "/catalog/pipes/").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[LOCATION], "/pipes/");

    let response = get(app.app(), "/catalog/pipes/pe100").await;
    assert_eq!(response.headers()[LOCATION], "/pipes/pe100/");

    // The listing itself is not caught by the rule.
    let response = get(app.app(), "/catalog/").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn inverse_rule_is_a_conflict(pool: PgPool) {
    let admin = common::create_admin(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&admin);

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/redirects",
        &token,
        serde_json::json!({ "from_path": "/a/", "to_path": "/b/" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/redirects",
        &token,
        serde_json::json!({ "from_path": "/b/", "to_path": "/a/" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn invalid_code_is_rejected(pool: PgPool) {
    let admin = common::create_admin(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&admin);

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/redirects",
        &token,
        serde_json::json!({ "from_path": "/x/", "to_path": "/y/", "code": 307 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn api_paths_are_never_redirected(pool: PgPool) {
    let admin = common::create_admin(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&admin);

    let response = common::get_auth(app.app(), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
