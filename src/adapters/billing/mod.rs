//! Billing adapters - implementations of the `TierSource` port.
//!
//! - `HttpTierSource` - Billing platform subscription status endpoint
//! - `StubTierSource` - In-memory statuses for development and tests

mod http_tier_source;
mod stub_tier_source;

pub use http_tier_source::{HttpTierSource, HttpTierSourceConfig};
pub use stub_tier_source::StubTierSource;
