pub mod catalog;
pub mod migrate;
pub mod seed;
pub mod user;

use proshop_api::config::{ApiConfig, ConfigError};
use proshop_api::db;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the database commands.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("PROSHOP_DATABASE_URL (or DATABASE_URL) must be set")]
    MissingDatabaseUrl,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Connect(#[from] sqlx::Error),
}

/// Connect to the database named by the API configuration.
pub async fn connect() -> Result<PgPool, DatabaseError> {
    let config = ApiConfig::from_env()?;
    let url = config
        .database_url
        .ok_or(DatabaseError::MissingDatabaseUrl)?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&url).await?)
}
