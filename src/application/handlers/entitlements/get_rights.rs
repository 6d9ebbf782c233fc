//! GetRightsHandler - Query handler for a user's current rights.

use std::sync::Arc;

use crate::domain::entitlements::{RightsRecord, SubscriptionSnapshot, SubscriptionTier};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::TierSource;

/// Query for a user's rights.
#[derive(Debug, Clone)]
pub struct GetRightsQuery {
    pub user_id: UserId,
}

/// A user's resolved rights.
#[derive(Debug, Clone)]
pub struct GetRightsResult {
    pub user_id: UserId,
    pub subscribed: bool,
    /// Tier whose rights apply, after the unsubscribed override.
    pub tier: SubscriptionTier,
    pub rights: RightsRecord,
}

/// Handler resolving a user's rights from a fresh billing status.
pub struct GetRightsHandler {
    tier_source: Arc<dyn TierSource>,
}

impl GetRightsHandler {
    pub fn new(tier_source: Arc<dyn TierSource>) -> Self {
        Self { tier_source }
    }

    pub async fn handle(&self, query: GetRightsQuery) -> Result<GetRightsResult, DomainError> {
        let snapshot = load_snapshot(self.tier_source.as_ref(), &query.user_id).await?;
        let rights = snapshot.rights();

        Ok(GetRightsResult {
            user_id: query.user_id,
            subscribed: snapshot.subscribed,
            tier: rights.tier,
            rights,
        })
    }
}

/// Fetches a fresh status and wraps it in a snapshot.
pub(super) async fn load_snapshot(
    tier_source: &dyn TierSource,
    user_id: &UserId,
) -> Result<SubscriptionSnapshot, DomainError> {
    let status = tier_source.fetch_status(user_id).await?;
    Ok(SubscriptionSnapshot::new(Some(user_id.clone()), status))
}
