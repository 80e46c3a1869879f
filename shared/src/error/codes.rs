//! Unified error codes for the restaurant services
//!
//! Error codes are organized by category:
//! - 0xxx: General errors (validation, lookup)
//! - 1xxx: Upload errors (menu image storage)
//! - 9xxx: System errors (store, gateway, internal)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as its `u16` value so clients can match on a stable number
/// without parsing the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Request body too large
    PayloadTooLarge = 9,

    // ==================== 1xxx: Upload ====================
    /// Filename rejected (empty, traversal, separators)
    InvalidFilename = 1001,
    /// Stored file not found
    FileNotFound = 1002,
    /// Uploaded file exceeds the size limit
    FileTooLarge = 1003,
    /// Uploaded file has no content
    EmptyFile = 1004,

    // ==================== 90xx: Internal / Store ====================
    /// Internal server error
    InternalError = 9001,
    /// Document store unreachable
    StoreUnavailable = 9002,
    /// Document store rejected the operation
    DatabaseError = 9003,

    // ==================== 91xx: Gateway ====================
    /// Upstream service unreachable, timed out or failed mid-transfer
    UpstreamUnavailable = 9101,
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

    /// Transient failures a caller may retry later
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorCode::StoreUnavailable | ErrorCode::UpstreamUnavailable
        )
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field missing",
            ErrorCode::ValueOutOfRange => "Value out of range",
            ErrorCode::PayloadTooLarge => "Request body too large",

            // Upload
            ErrorCode::InvalidFilename => "Invalid filename",
            ErrorCode::FileNotFound => "File not found",
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::EmptyFile => "Empty file provided",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StoreUnavailable => "Document store unavailable",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::UpstreamUnavailable => "Service temporarily unavailable",
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
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::PayloadTooLarge),

            1001 => Ok(ErrorCode::InvalidFilename),
            1002 => Ok(ErrorCode::FileNotFound),
            1003 => Ok(ErrorCode::FileTooLarge),
            1004 => Ok(ErrorCode::EmptyFile),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StoreUnavailable),
            9003 => Ok(ErrorCode::DatabaseError),
            9101 => Ok(ErrorCode::UpstreamUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
