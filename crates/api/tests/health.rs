//! Health probe and cross-cutting HTTP behaviour (request ids, caching,
//! static files).

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    std::fs::create_dir_all(&app.config.upload_dir).unwrap();
    let response = get(app.app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["site"], "ГлавТрубТорг");
    assert_eq!(json["database"], true);
    assert_eq!(json["uploads"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn missing_upload_dir_is_degraded(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app.app(), "/health").await).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["uploads"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn response_carries_request_id_and_no_cache(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app.app(), "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header must be present");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
    assert_eq!(
        response.headers()["cache-control"],
        "no-cache, no-store, must-revalidate"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn static_files_are_served_and_cacheable(pool: PgPool) {
    let app = common::build_test_app(pool);
    std::fs::write(app.static_dir.path().join("robots-test.txt"), "hello").unwrap();

    let response = get(app.app(), "/static/robots-test.txt").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("cache-control").is_none());
    assert_eq!(common::body_text(response).await, "hello");
}
