//! Reservation Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reservation document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Local time of day, `HH:MM`
    pub time: String,
    pub guests: i64,
    pub created_at: DateTime<Utc>,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub name: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub guests: i64,
}
