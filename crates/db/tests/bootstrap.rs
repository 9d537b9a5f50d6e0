use sqlx::PgPool;

/// Connect, migrate, verify seed data.
#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_full_bootstrap(pool: PgPool) {
    glavtrub_db::health_check(&pool).await.unwrap();

    let seeded = [
        ("pages", 5),
        ("menu_items", 7),
        ("site_sections", 4),
        ("settings", 7),
        ("redirect_rules", 1),
    ];
    for (table, expected) in seeded {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, expected, "{table} seed rows");
    }
}

/// `updated_at` is maintained by trigger.
#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_updated_at_trigger(pool: PgPool) {
    let (before,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("SELECT updated_at FROM pages WHERE slug = 'about'")
            .fetch_one(&pool)
            .await
            .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let (after,): (chrono::DateTime<chrono::Utc>,) = sqlx::query_as(
        "UPDATE pages SET title = 'О нас' WHERE slug = 'about' RETURNING updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(after > before);
}
