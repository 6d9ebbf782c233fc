//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TierSource` - Billing status check supplying `(subscribed, tier)`

mod tier_source;

pub use tier_source::TierSource;
