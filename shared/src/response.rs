//! API Response types
//!
//! Success bodies that are not a bare document. Errors use
//! [`crate::error::ErrorBody`].

use serde::{Deserialize, Serialize};

/// Plain confirmation body
///
/// ```json
/// { "message": "Menu item deleted" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Liveness probe body
///
/// `timestamp` is RFC 3339 in UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

impl HealthResponse {
    /// A healthy response stamped with the current time
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: crate::util::now_rfc3339(),
        }
    }
}
