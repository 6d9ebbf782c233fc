//! Tier source port.
//!
//! The billing platform is the authority on whether an account is subscribed
//! and at which tier. This port is the only way the entitlement model learns
//! about it.
//!
//! # Example
//!
//! ```ignore
//! use salon_entitlements::ports::TierSource;
//! use salon_entitlements::domain::entitlements::SubscriptionSnapshot;
//!
//! async fn current_rights(source: &dyn TierSource, user_id: &UserId) -> Result<RightsRecord, DomainError> {
//!     let status = source.fetch_status(user_id).await?;
//!     Ok(SubscriptionSnapshot::new(Some(user_id.clone()), status).rights())
//! }
//! ```

use async_trait::async_trait;

use crate::domain::entitlements::SubscriptionStatus;
use crate::domain::foundation::{DomainError, UserId};

/// Port for fetching a user's billing status.
///
/// Implementations perform I/O and may fail; failures must be reported as
/// `ErrorCode::BillingUnavailable` so callers can keep the last known status.
#[async_trait]
pub trait TierSource: Send + Sync {
    /// Fetch the current `(subscribed, tier)` pair for a user.
    async fn fetch_status(&self, user_id: &UserId) -> Result<SubscriptionStatus, DomainError>;
}
