//! Unified error codes for the zone pricing workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Company errors
//! - 6xxx: Product errors
//! - 7xxx: Zone errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the portal frontend can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied (row-level security rejected the request)
    PermissionDenied = 2001,

    // ==================== 3xxx: Company ====================
    /// No company could be resolved for the authenticated user
    CompanyNotFound = 3001,
    /// Company has no active store to attach new zones to
    StoreNotFound = 3002,

    // ==================== 6xxx: Product ====================
    /// Every requested product is already assigned to the zone
    ProductsAlreadyAssigned = 6002,

    // ==================== 7xxx: Zone ====================
    /// Delivery zone not found
    ZoneNotFound = 7001,
    /// Product-zone assignment not found
    AssignmentNotFound = 7101,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// The joined assignment query failed (usually missing grants or RLS policy on products/zones)
    AssignmentQueryFailed = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Company
            ErrorCode::CompanyNotFound => "No company found for user",
            ErrorCode::StoreNotFound => "No active store found for company",

            // Product
            ErrorCode::ProductsAlreadyAssigned => {
                "All selected products are already assigned to this zone"
            }

            // Zone
            ErrorCode::ZoneNotFound => "Zone not found",
            ErrorCode::AssignmentNotFound => "Assignment not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::AssignmentQueryFailed => {
                "Failed to load product zone assignments with product and zone details"
            }
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Company
            3001 => Ok(ErrorCode::CompanyNotFound),
            3002 => Ok(ErrorCode::StoreNotFound),

            // Product
            6002 => Ok(ErrorCode::ProductsAlreadyAssigned),

            // Zone
            7001 => Ok(ErrorCode::ZoneNotFound),
            7101 => Ok(ErrorCode::AssignmentNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9101 => Ok(ErrorCode::AssignmentQueryFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::CompanyNotFound.code(), 3001);
        assert_eq!(ErrorCode::ProductsAlreadyAssigned.code(), 6002);
        assert_eq!(ErrorCode::ZoneNotFound.code(), 7001);
        assert_eq!(ErrorCode::AssignmentNotFound.code(), 7101);
        assert_eq!(ErrorCode::AssignmentQueryFailed.code(), 9101);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(3001), Ok(ErrorCode::CompanyNotFound));
        assert_eq!(ErrorCode::try_from(7001), Ok(ErrorCode::ZoneNotFound));
        assert_eq!(ErrorCode::try_from(9002), Ok(ErrorCode::DatabaseError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(4001), Err(InvalidErrorCode(4001)));
        assert_eq!(ErrorCode::try_from(6001), Err(InvalidErrorCode(6001)));
        assert_eq!(ErrorCode::try_from(7002), Err(InvalidErrorCode(7002)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::ZoneNotFound).unwrap();
        assert_eq!(json, "7001");

        let parsed: ErrorCode = serde_json::from_str("6002").unwrap();
        assert_eq!(parsed, ErrorCode::ProductsAlreadyAssigned);

        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::CompanyNotFound), "3001");
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::CompanyNotFound.message(),
            "No company found for user"
        );
        assert_eq!(ErrorCode::ZoneNotFound.message(), "Zone not found");
        assert_eq!(
            ErrorCode::ProductsAlreadyAssigned.message(),
            "All selected products are already assigned to this zone"
        );
    }
}
