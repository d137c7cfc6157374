//! Zone Service - delivery zones and per-zone product pricing
//!
//! # Module structure
//!
//! ```text
//! zone-service/src/
//! ├── core/          # configuration
//! ├── db/            # PostgreSQL pool, repositories, ZoneStore implementations
//! ├── services/      # ZoneAssignmentService, zone statistics
//! └── utils/         # logging, input validation
//! ```
//!
//! # Example
//!
//! ```ignore
//! let config = Config::from_env()?;
//! init_logger_from_config(&config);
//! let db = DbService::new(&config).await?;
//! let mut service = ZoneAssignmentService::new(Arc::new(db.zone_store()), auth);
//! service.load().await;
//! ```

pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use core::Config;
pub use db::{DbService, MemoryZoneStore, PgZoneStore, RepoError, RepoResult, ZoneStore};
pub use services::{ZoneAssignmentService, compute_zone_stats};

// Re-export unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_from_config, init_logger_with_file};
