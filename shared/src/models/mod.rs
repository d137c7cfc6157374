//! Data models
//!
//! Row shapes of the hosted store plus the form payloads the portal submits.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are UUIDs; timestamps are Unix millis; money is `Decimal`.

pub mod auth;
pub mod product;
pub mod serde_helpers;
pub mod store;
pub mod zone;
pub mod zone_assignment;
pub mod zone_stats;

// Re-exports
pub use auth::*;
pub use product::*;
pub use store::*;
pub use zone::*;
pub use zone_assignment::*;
pub use zone_stats::*;
