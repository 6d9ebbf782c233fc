//! Entitlement refresh configuration
//!
//! Read by applications that embed the library and run a
//! [`TierWatcher`](crate::adapters::subscription::TierWatcher) for a signed-in
//! user. Pass [`EntitlementConfig::watcher_config`] to `TierWatcher::with_config`.

use std::time::Duration;

use serde::Deserialize;

use crate::adapters::subscription::TierWatcherConfig;

use super::error::ValidationError;

/// Tier watcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EntitlementConfig {
    /// Seconds between billing status polls while a user is signed in
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl EntitlementConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn watcher_config(&self) -> TierWatcherConfig {
        TierWatcherConfig::default().with_poll_interval(self.poll_interval())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=3600).contains(&self.poll_interval_secs) {
            return Err(ValidationError::InvalidPollInterval);
        }
        Ok(())
    }
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    30
}
