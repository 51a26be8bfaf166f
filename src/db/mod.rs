//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Postgres is optional. When `DATABASE_URL` is set, startup creates the
//! shared SQLx pool here and applies migrations before the campaign store
//! accepts traffic; otherwise campaigns stay in memory.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Initialize the `PostgreSQL` connection pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}
