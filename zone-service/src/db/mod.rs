//! Database Module
//!
//! PostgreSQL connection pool, migrations and the [`ZoneStore`] implementations

pub mod memory;
pub mod repository;
pub mod zone_store;

pub use memory::MemoryZoneStore;
pub use repository::{RepoError, RepoResult};
pub use zone_store::{PgZoneStore, ZoneStore};

use crate::core::Config;
use shared::error::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Database service - owns a PostgreSQL connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: PgPool,
}

impl DbService {
    /// Connect the pool and optionally apply `migrations/`
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_millis(config.db_acquire_timeout_ms))
            .connect(&config.database_url)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        tracing::info!(
            max_connections = config.db_max_connections,
            "Database connection established (PostgreSQL)"
        );

        if config.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self { pool })
    }

    /// Store over this pool
    pub fn zone_store(&self) -> PgZoneStore {
        PgZoneStore::new(self.pool.clone())
    }
}
