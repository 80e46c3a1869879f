//! Request-boundary helpers

pub mod extract;
pub mod money;
pub mod validation;

pub use extract::ValidatedJson;
pub use validation::Validate;
