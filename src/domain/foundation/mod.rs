//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers and error types that form the vocabulary
//! shared by the entitlement domain, its ports, and adapters.

mod errors;
mod ids;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::UserId;
