//! Data models
//!
//! Wire types shared by the resource services and their tests.
//! Every stored document carries its store-assigned id under `_id`;
//! the remaining fields are camelCase.
//!
//! Each resource has three shapes: the stored document, a `*Create`
//! payload (required fields) and, where updates exist, a `*Update`
//! payload whose absent fields are left untouched.

pub mod contact;
pub mod menu;
pub mod order;
pub mod reservation;

// Re-exports
pub use contact::*;
pub use menu::*;
pub use order::*;
pub use reservation::*;
