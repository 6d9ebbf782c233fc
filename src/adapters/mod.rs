//! Adapters - implementations of ports and inbound interfaces.
//!
//! # Module Structure
//!
//! - `billing` - `TierSource` implementations (HTTP, stub)
//! - `subscription` - `TierWatcher` snapshot publisher
//! - `http` - Axum REST API

pub mod billing;
pub mod http;
pub mod subscription;

pub use billing::{HttpTierSource, HttpTierSourceConfig, StubTierSource};
pub use subscription::{TierWatcher, TierWatcherConfig};
