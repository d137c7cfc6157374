use shared::error::{AppError, AppResult};

/// Zone service configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_URL | (required) | PostgreSQL connection URL |
/// | DB_MAX_CONNECTIONS | 5 | Pool size |
/// | DB_ACQUIRE_TIMEOUT_MS | 5000 | Max wait for a pooled connection |
/// | RUN_MIGRATIONS | false | Apply bundled migrations on connect |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (unset) | Daily rolling log files when set |
/// | ENVIRONMENT | development | development / staging / production |
///
/// # Example
///
/// ```ignore
/// DATABASE_URL=postgres://portal@localhost/portal RUN_MIGRATIONS=true cargo test
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Maximum pooled connections
    pub db_max_connections: u32,
    /// Connection acquire timeout (ms)
    pub db_acquire_timeout_ms: u64,
    /// Apply `migrations/` on startup
    pub run_migrations: bool,
    /// tracing level filter
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
    /// Directory for rolling log files
    pub log_dir: Option<String>,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::config("DATABASE_URL must be set"))?;

        Ok(Self {
            database_url,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
            db_acquire_timeout_ms: std::env::var("DB_ACQUIRE_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            run_migrations: std::env::var("RUN_MIGRATIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        })
    }

    /// Build a configuration without touching the environment
    ///
    /// Used by tests and embedders that already hold a connection URL.
    pub fn with_overrides(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            db_max_connections: 5,
            db_acquire_timeout_ms: 5000,
            run_migrations: false,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            environment: "development".into(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
