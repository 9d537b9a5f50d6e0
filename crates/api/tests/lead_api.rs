//! Integration tests for the public contact form.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use glavtrub_core::captcha::issue_token;
use glavtrub_db::repositories::LeadRepo;
use glavtrub_events::SiteEvent;
use sqlx::PgPool;

fn captcha_fields(app: &common::TestApp, answer: i64) -> (String, String) {
    let now = chrono::Utc::now().timestamp();
    (
        answer.to_string(),
        issue_token(&app.config.captcha_secret, answer, now),
    )
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn captcha_endpoint_issues_question(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.app(), "/captcha/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(!json["data"]["question"].as_str().unwrap().is_empty());
    assert!(json["data"]["token"].as_str().unwrap().contains('.'));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn valid_lead_is_stored_and_announced(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let mut events = app.event_bus.subscribe();
    let (answer, token) = captcha_fields(&app, 12);

    let response = post_json(
        app.app(),
        "/lead/",
        serde_json::json!({
            "name": "Иван",
            "phone": "+7 999 000-00-00",
            "message": "Нужна труба 40/32",
            "page_url": "/truby-pnd/",
            "utm_source": "yandex",
            "captcha_answer": answer,
            "captcha_token": token,
            "website": ""
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Заявка успешно отправлена"));

    let leads = LeadRepo::list(&pool, &Default::default()).await.unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].source, "site");
    assert_eq!(leads[0].utm_source, "yandex");

    match events.try_recv() {
        Ok(SiteEvent::LeadSubmitted(notice)) => assert_eq!(notice.lead_id, leads[0].id),
        other => panic!("expected a lead event, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn wrong_captcha_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = captcha_fields(&app, 12);

    let response = post_json(
        app.app(),
        "/lead/",
        serde_json::json!({
            "name": "Иван",
            "phone": "+7 999 000-00-00",
            "captcha_answer": "13",
            "captcha_token": token
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let leads = LeadRepo::list(&pool, &Default::default()).await.unwrap();
    assert!(leads.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn lead_without_contact_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (answer, token) = captcha_fields(&app, 5);

    let response = post_json(
        app.app(),
        "/lead/",
        serde_json::json!({
            "name": "Иван",
            "captcha_answer": answer,
            "captcha_token": token
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn honeypot_submission_is_dropped_silently(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let mut events = app.event_bus.subscribe();

    let response = post_json(
        app.app(),
        "/lead/",
        serde_json::json!({
            "name": "bot",
            "phone": "1",
            "website": "http://spam.example"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let leads = LeadRepo::list(&pool, &Default::default()).await.unwrap();
    assert!(leads.is_empty());
    assert!(events.try_recv().is_err());
}
