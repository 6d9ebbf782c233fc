//! Subscription state publishing.
//!
//! - `TierWatcher` - Polls the tier source and publishes snapshots

mod tier_watcher;

pub use tier_watcher::{TierWatcher, TierWatcherConfig};
