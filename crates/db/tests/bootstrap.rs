use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify the schema exists.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    reelhub_db::health_check(&pool).await.unwrap();

    // Verify all three entity tables exist and are empty.
    for table in ["users", "videos", "watched_videos"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}
