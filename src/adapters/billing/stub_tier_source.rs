//! In-memory TierSource for development and testing.
//!
//! Users without a configured status are reported as unsubscribed. The stub
//! can be switched into a failing mode to exercise billing outages.
//!
//! # Usage
//!
//! ```ignore
//! use salon_entitlements::adapters::billing::StubTierSource;
//!
//! let source = StubTierSource::new()
//!     .with_status(owner_id, SubscriptionStatus::subscribed("premium"));
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::entitlements::SubscriptionStatus;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::TierSource;

/// Stub TierSource with per-user statuses.
#[derive(Debug, Default)]
pub struct StubTierSource {
    statuses: RwLock<HashMap<UserId, SubscriptionStatus>>,
    failing: AtomicBool,
    fetches: AtomicUsize,
}

impl StubTierSource {
    /// Create a stub where every user is unsubscribed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stub that fails every fetch.
    pub fn failing() -> Self {
        let stub = Self::new();
        stub.set_failing(true);
        stub
    }

    /// Set a user's status.
    pub fn with_status(self, user_id: UserId, status: SubscriptionStatus) -> Self {
        self.set_status(user_id, status);
        self
    }

    /// Change a user's status; visible on the next fetch.
    pub fn set_status(&self, user_id: UserId, status: SubscriptionStatus) {
        if let Ok(mut statuses) = self.statuses.write() {
            statuses.insert(user_id, status);
        }
    }

    /// Toggle simulated billing outages.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of fetches served so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TierSource for StubTierSource {
    async fn fetch_status(&self, user_id: &UserId) -> Result<SubscriptionStatus, DomainError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::billing_unavailable("Simulated billing outage"));
        }

        let statuses = self
            .statuses
            .read()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Stub status lock poisoned"))?;

        Ok(statuses.get(user_id).cloned().unwrap_or_default())
    }
}
