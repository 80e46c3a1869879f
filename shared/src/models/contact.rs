//! Contact Model

use serde::{Deserialize, Serialize};

/// Contact message document (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Create contact payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactCreate {
    pub name: String,
    pub email: String,
    pub message: String,
}
