//! Database bootstrap: connection options, database creation, students table DDL, pool.

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::sql;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

/// Maintenance database used to create the configured one.
const ADMIN_DATABASE: &str = "postgres";

pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
}

/// Create the configured database if it does not exist. No-op for the maintenance database itself.
pub async fn ensure_database_exists(config: &DatabaseConfig) -> Result<(), StoreError> {
    if config.name.is_empty() || config.name == ADMIN_DATABASE {
        return Ok(());
    }
    let opts = connect_options(config).database(ADMIN_DATABASE);
    let mut conn = opts.connect().await.map_err(StoreError::Connect)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&config.name)
        .fetch_one(&mut conn)
        .await
        .map_err(StoreError::Query)?;
    if !exists.0 {
        tracing::info!(database = %config.name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&config.name)))
            .execute(&mut conn)
            .await
            .map_err(StoreError::Query)?;
    }
    Ok(())
}

/// Create the students table if missing.
pub async fn ensure_students_table(pool: &PgPool) -> Result<(), StoreError> {
    let ddl = sql::create_students_table();
    tracing::debug!(sql = %ddl, "ddl");
    sqlx::query(&ddl).execute(pool).await.map_err(StoreError::Query)?;
    Ok(())
}

pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connect_options(config))
        .await
        .map_err(StoreError::Connect)
}
