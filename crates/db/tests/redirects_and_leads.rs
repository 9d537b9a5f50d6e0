use glavtrub_core::redirect::{resolve, RedirectStatus};
use glavtrub_db::models::lead::{CreateLead, LeadListParams, UtmParams};
use glavtrub_db::models::redirect_rule::{CreateRedirectRule, UpdateRedirectRule};
use glavtrub_db::repositories::{DashboardRepo, LeadRepo, RedirectRuleRepo};
use sqlx::PgPool;

fn rule(from: &str, to: &str, wildcard: bool, sort_order: i32) -> CreateRedirectRule {
    CreateRedirectRule {
        from_path: from.to_string(),
        to_path: to.to_string(),
        code: None,
        is_active: None,
        is_wildcard: Some(wildcard),
        comment: None,
        sort_order: Some(sort_order),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_active_rules_feed_resolver_in_order(pool: PgPool) {
    RedirectRuleRepo::create(&pool, &rule("/old/*", "/second/*", true, 2)).await.unwrap();
    RedirectRuleRepo::create(&pool, &rule("/old/*", "/first/*", true, 1)).await.unwrap();
    let disabled = RedirectRuleRepo::create(&pool, &rule("/gone/", "/here/", false, 0))
        .await
        .unwrap();
    RedirectRuleRepo::update(
        &pool,
        disabled.id,
        &UpdateRedirectRule {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // Two authored rules plus the seeded legacy catalog rule, which sorts last.
    let rules = RedirectRuleRepo::active_rules(&pool).await.unwrap();
    assert_eq!(rules.len(), 3);
    assert_eq!(
        resolve("/catalog/ppu/", &rules).unwrap().target,
        "/ppu/"
    );

    let hit = resolve("/old/pipes/", &rules).unwrap();
    assert_eq!(hit.target, "/first/pipes/");
    assert_eq!(hit.status, RedirectStatus::MovedPermanently);

    // Inactive exact rule falls through to the trailing-slash step.
    let miss = resolve("/gone", &rules).unwrap();
    assert_eq!(miss.target, "/gone/");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_code_check_constraint(pool: PgPool) {
    let mut bad = rule("/a/", "/b/", false, 0);
    bad.code = Some(307);
    let err = RedirectRuleRepo::create(&pool, &bad).await.unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("ck_redirect_rules_code")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_pairs_exclude_self(pool: PgPool) {
    let a = RedirectRuleRepo::create(&pool, &rule("/a/", "/b/", false, 0)).await.unwrap();
    RedirectRuleRepo::create(&pool, &rule("/c/", "/d/", false, 0)).await.unwrap();

    let all = RedirectRuleRepo::pairs(&pool, None).await.unwrap();
    assert_eq!(all.len(), 3);
    let others = RedirectRuleRepo::pairs(&pool, Some(a.id)).await.unwrap();
    assert_eq!(others.len(), 2);
    assert!(others.contains(&("/c/".to_string(), "/d/".to_string())));
    assert!(!others.contains(&("/a/".to_string(), "/b/".to_string())));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_leads_and_dashboard(pool: PgPool) {
    let lead = LeadRepo::create(
        &pool,
        &CreateLead {
            name: "Иван".into(),
            phone: "+7 900 000-00-00".into(),
            page_url: "/ppu/".into(),
            utm: UtmParams {
                utm_source: "yandex".into(),
                ..Default::default()
            },
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(lead.status, "new");
    assert_eq!(lead.source, "site");
    assert_eq!(lead.utm_params(), vec![("utm_source", "yandex".to_string())]);

    let stats = DashboardRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.counts.new_leads, 1);
    assert_eq!(stats.counts.pages, 5);
    assert_eq!(stats.recent_leads.len(), 1);

    LeadRepo::set_status(&pool, lead.id, "done").await.unwrap().unwrap();
    let open = LeadRepo::list(
        &pool,
        &LeadListParams {
            status: Some("new".into()),
            limit: None,
            offset: None,
        },
    )
    .await
    .unwrap();
    assert!(open.is_empty());
    assert!(LeadRepo::set_status(&pool, lead.id, "bogus").await.is_err());
}
