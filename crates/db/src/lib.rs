//! Database access layer for the CareWatch alerting service.
//!
//! Exposes the connection-pool helpers, the `patients`/`caregivers` row
//! models, static-method repositories over a [`DbPool`], and the
//! [`store::RecordStore`] seam the alerting pipeline reads through.

pub mod models;
pub mod repositories;
pub mod store;

/// Shared PostgreSQL connection pool type.
pub type DbPool = sqlx::PgPool;

/// Maximum number of connections held by the pool.
const MAX_CONNECTIONS: u32 = 10;

/// Create a connection pool for the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Verify the database is reachable with a trivial round-trip query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

/// Apply all pending migrations from the crate's `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
