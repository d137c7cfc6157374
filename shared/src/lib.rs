//! Shared types for the zone pricing workspace
//!
//! Row models, form payloads and the unified error system used by the
//! zone-service crate and by presentation code that consumes it.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
