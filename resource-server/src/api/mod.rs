//! HTTP API
//!
//! Each resource owns a `router()`; [`router`] merges the health check
//! with the routes of the one resource this process serves.

pub mod contact;
pub mod health;
pub mod menu;
pub mod orders;
pub mod reservation;
pub mod upload;

use axum::Router;

use crate::core::{Config, ServerState};
use crate::resource::Resource;

/// Routes for the configured resource (without state)
pub fn router(config: &Config) -> Router<ServerState> {
    let resource_routes = match config.resource {
        Resource::Menu => menu::router(config.max_upload_bytes).merge(upload::router()),
        Resource::Order => orders::router(),
        Resource::Reservation => reservation::router(),
        Resource::Contact => contact::router(),
    };

    Router::new().merge(health::router()).merge(resource_routes)
}
