//! Integration tests for the admin content and catalog API.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_json_auth, post_multipart_auth, put_json_auth,
    TestApp,
};
use glavtrub_db::models::lead::CreateLead;
use glavtrub_db::repositories::LeadRepo;
use sqlx::PgPool;

async fn create(app: &TestApp, token: &str, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(app.app(), uri, token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn catalog_tree_crud(pool: PgPool) {
    let editor = common::create_editor(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&editor);

    let category = create(
        &app,
        &token,
        "/api/v1/admin/categories",
        serde_json::json!({ "name": "Трубы ПНД" }),
    )
    .await;
    assert_eq!(category["slug"], "truby_pnd");

    let line = create(
        &app,
        &token,
        "/api/v1/admin/product-lines",
        serde_json::json!({
            "category_id": category["id"],
            "name": "ПЭ100 SDR17",
            "slug": "pe100-sdr17",
            "discount_percent": 10.0
        }),
    )
    .await;

    let item = create(
        &app,
        &token,
        "/api/v1/admin/size-items",
        serde_json::json!({
            "product_line_id": line["id"],
            "size_text": "40/32",
            "price": 250.0
        }),
    )
    .await;
    assert_eq!(item["size_slug"], "40_32");
    assert_eq!(item["full_name"], "ПЭ100 SDR17 40/32");

    // Same size slug within the line conflicts.
    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/size-items",
        &token,
        serde_json::json!({ "product_line_id": line["id"], "size_text": "40/32" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let uri = format!("/api/v1/admin/size-items?product_line_id={}", line["id"]);
    let list = body_json(get_auth(app.app(), &uri, &token).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let uri = format!("/api/v1/admin/categories/{}", category["id"]);
    let response = put_json_auth(
        app.app(),
        &uri,
        &token,
        serde_json::json!({ "h1": "Полиэтиленовые трубы" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["h1"], "Полиэтиленовые трубы");

    // Deleting the category cascades to its lines and items.
    let response = delete_auth(app.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let uri = format!("/api/v1/admin/size-items/{}", item["id"]);
    let response = get_auth(app.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn invalid_input_is_rejected(pool: PgPool) {
    let editor = common::create_editor(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&editor);

    // Reserved slug.
    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/categories",
        &token,
        serde_json::json!({ "name": "Каталог", "slug": "catalog" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // Unknown category is a foreign key violation.
    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/product-lines",
        &token,
        serde_json::json!({ "category_id": 999_999, "name": "Line" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn news_slugs_are_made_unique(pool: PgPool) {
    let editor = common::create_editor(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&editor);

    let first = create(
        &app,
        &token,
        "/api/v1/admin/news",
        serde_json::json!({ "title": "Новое поступление" }),
    )
    .await;
    let second = create(
        &app,
        &token,
        "/api/v1/admin/news",
        serde_json::json!({ "title": "Новое поступление" }),
    )
    .await;

    assert_eq!(first["slug"], "novoe_postuplenie");
    assert_eq!(second["slug"], "novoe_postuplenie_1");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn document_upload_and_delete(pool: PgPool) {
    let editor = common::create_editor(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&editor);

    let response = post_multipart_auth(
        app.app(),
        "/api/v1/admin/documents",
        &token,
        "Прайс 2025.pdf",
        b"%PDF-1.4 test",
        &[("title", "Прайс-лист"), ("doc_type", "price")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let doc = body_json(response).await["data"].clone();
    assert_eq!(doc["title"], "Прайс-лист");
    assert_eq!(doc["file_path"], "/static/uploads/documents/prays_2025.pdf");

    let stored = app.static_dir.path().join("uploads/documents/prays_2025.pdf");
    assert!(stored.exists());

    let response = common::get(app.app(), "/static/uploads/documents/prays_2025.pdf").await;
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("/api/v1/admin/documents/{}", doc["id"]);
    let response = delete_auth(app.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!stored.exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn disallowed_document_type_is_rejected(pool: PgPool) {
    let editor = common::create_editor(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&editor);

    let response = post_multipart_auth(
        app.app(),
        "/api/v1/admin/documents",
        &token,
        "install.sh",
        b"#!/bin/sh",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn settings_save_validates_opacity(pool: PgPool) {
    let admin = common::create_admin(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&admin);

    let response = put_json_auth(
        app.app(),
        "/api/v1/admin/settings",
        &token,
        serde_json::json!([{ "key": "WATERMARK_OPACITY", "value": "1.5" }]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app.app(),
        "/api/v1/admin/settings",
        &token,
        serde_json::json!([
            { "key": "WATERMARK_OPACITY", "value": "0.5" },
            { "key": "PHONE", "value": "+7 (495) 000-00-00" }
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let settings = body_json(response).await["data"].clone();
    let phone = settings
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["key"] == "PHONE")
        .unwrap();
    assert_eq!(phone["value"], "+7 (495) 000-00-00");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn csv_import_reports_row_errors(pool: PgPool) {
    let admin = common::create_admin(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&admin);

    let template = get_auth(app.app(), "/api/v1/admin/import/categories/template", &token).await;
    assert_eq!(template.status(), StatusCode::OK);
    assert!(template.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .contains("attachment"));

    let csv = "name;slug;sort_order;is_active\n\
               Трубы;;1;1\n\
               ;bad;2;1\n";
    let response = post_multipart_auth(
        app.app(),
        "/api/v1/admin/import/categories",
        &token,
        "categories.csv",
        csv.as_bytes(),
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await["data"].clone();
    assert_eq!(report["success"], 1);
    assert_eq!(report["errors"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn backup_round_trip_restores_catalog(pool: PgPool) {
    let admin = common::create_admin(&pool).await;
    let app = common::build_test_app(pool);
    let token = app.token(&admin);

    create(
        &app,
        &token,
        "/api/v1/admin/categories",
        serde_json::json!({ "name": "Изоляция", "slug": "izolyaciya" }),
    )
    .await;

    let response = get_auth(app.app(), "/api/v1/admin/backup", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let backup = body_json(response).await;
    assert!(backup["tables"]["categories"].is_array());

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/backup?clear_existing=true",
        &token,
        backup,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(get_auth(app.app(), "/api/v1/admin/categories", &token).await).await;
    let slugs: Vec<_> = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(slugs, vec!["izolyaciya"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn dashboard_counts_and_lead_status(pool: PgPool) {
    let editor = common::create_editor(&pool).await;
    let lead = LeadRepo::create(
        &pool,
        &CreateLead {
            name: "Иван".into(),
            phone: "+79990000000".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);
    let token = app.token(&editor);

    let stats = body_json(get_auth(app.app(), "/api/v1/admin/dashboard", &token).await).await;
    assert_eq!(stats["data"]["new_leads"], 1);
    assert_eq!(stats["data"]["recent_leads"][0]["id"], lead.id);

    let uri = format!("/api/v1/admin/leads/{}/status", lead.id);
    let response = put_json_auth(app.app(), &uri, &token, serde_json::json!({ "status": "archived" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(app.app(), &uri, &token, serde_json::json!({ "status": "done" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "done");

    let stats = body_json(get_auth(app.app(), "/api/v1/admin/dashboard", &token).await).await;
    assert_eq!(stats["data"]["new_leads"], 0);
}
