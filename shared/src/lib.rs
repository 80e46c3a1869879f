//! Shared types for the restaurant platform
//!
//! Common types used by the gateway and the resource services: the
//! unified error system, wire models, response bodies, logging setup
//! and small utilities.

pub mod error;
pub mod logging;
pub mod models;
pub mod response;
pub mod shutdown;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use error::{AppError, AppResult, ErrorCode};
pub use http;
pub use response::{HealthResponse, MessageResponse};
pub use shutdown::shutdown_signal;
pub use serde::{Deserialize, Serialize};
