//! Reverse-proxy gateway
//!
//! Answers `/health` itself, forwards every request under a known
//! prefix to the owning resource service, and falls back to an
//! informational JSON body for anything else.
//!
//! ```text
//! client ──► gateway ──/api/menu, /uploads──► menu-service
//!                    ──/api/orders─────────► order-service
//!                    ──/api/reservation────► reservation-service
//!                    ──/api/contact────────► contact-service
//! ```

pub mod api;
pub mod config;
pub mod proxy;
pub mod routes;
pub mod server;

pub use config::Config;
pub use routes::{ResolvedRoute, Route, RouteTable, Upstream};
pub use server::{Gateway, GatewayState, build_app};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
