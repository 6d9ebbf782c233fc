//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors)
//! - `entitlements` - Subscription tiers, rights, and access/quota queries

pub mod entitlements;
pub mod foundation;
