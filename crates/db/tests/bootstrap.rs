use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    stayio_db::health_check(&pool).await.unwrap();

    let tables = [
        "managers",
        "tenants",
        "properties",
        "tenant_favorites",
        "applications",
    ];

    for table in tables {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = $1)",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap_or_else(|e| panic!("{table} lookup failed: {e}"));
        assert!(exists.0, "{table} should exist after migrations");
    }
}
