//! Repository Module
//!
//! PostgreSQL queries for the zone pricing tables, one file per table group.
//! Every query carries an explicit `company_id` predicate in addition to the
//! row-level security policies of the hosted database.

pub mod assignment;
pub mod company;
pub mod product;
pub mod store;
pub mod zone;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Missing table/column; the schema or the exposed view is out of date
    #[error("Schema mismatch: {0}")]
    Schema(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl RepoError {
    /// Errors that point at grants, RLS policies or schema rather than data
    pub fn is_configuration(&self) -> bool {
        matches!(self, RepoError::PermissionDenied(_) | RepoError::Schema(_))
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.code().as_deref() {
                    // unique_violation
                    Some("23505") => RepoError::Duplicate(message),
                    // insufficient_privilege (grants / RLS)
                    Some("42501") => RepoError::PermissionDenied(message),
                    // undefined_table, undefined_column
                    Some("42P01") | Some("42703") => RepoError::Schema(message),
                    _ => RepoError::Database(err.to_string()),
                }
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::PermissionDenied(msg) => AppError::permission_denied(msg),
            RepoError::Schema(msg) => AppError::database(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
