//! Conexión a PostgreSQL

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

/// Crea el pool de conexiones contra la base configurada.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    info!("🔌 Conectando a PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    info!("✅ Pool de conexiones creado");
    Ok(pool)
}
