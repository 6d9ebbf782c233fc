//! CheckEntitlementHandler - Query handler for feature and limit gates.
//!
//! Keys arrive as strings from the outside world and are validated here:
//! an unknown key fails the query instead of reading as "no access".

use std::sync::Arc;

use crate::domain::entitlements::{
    can_access, is_within_limit, remaining_usage, requires_upgrade, upgrade_reason,
    EntitlementError, FeatureKey, Limit, LimitCheck, LimitKey, SubscriptionTier, UpgradeReason,
};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::TierSource;

use super::get_rights::load_snapshot;

/// Query to check a feature and/or a usage limit.
#[derive(Debug, Clone)]
pub struct CheckEntitlementQuery {
    pub user_id: UserId,
    /// Feature key wire name, e.g. `canAccessAdvancedStats`.
    pub feature: Option<String>,
    /// Limit key wire name, e.g. `maxBarbers`.
    pub limit: Option<String>,
    /// Current resource count; required when `limit` is given.
    pub current: Option<u32>,
}

/// Outcome of an entitlement check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckEntitlementResult {
    pub tier: SubscriptionTier,
    pub requires_upgrade: bool,
    /// Whether the feature is granted, when one was requested.
    pub feature_granted: Option<bool>,
    /// Whether one more resource fits, when a limit was requested.
    pub within_limit: Option<bool>,
    /// Remaining quota, when a limit was requested.
    pub remaining: Option<Limit>,
    pub reason: Option<UpgradeReason>,
}

impl CheckEntitlementQuery {
    /// Parses the requested keys. Fails on unknown names.
    pub fn parse(&self) -> Result<(Option<FeatureKey>, Option<LimitCheck>), EntitlementError> {
        let feature = self
            .feature
            .as_deref()
            .map(str::parse::<FeatureKey>)
            .transpose()?;

        let limit = match self.limit.as_deref() {
            Some(raw) => {
                let key = raw.parse::<LimitKey>()?;
                let current = self
                    .current
                    .ok_or_else(|| EntitlementError::MissingCurrentCount(key.name().to_string()))?;
                Some(LimitCheck::new(key, current))
            }
            None => None,
        };

        Ok((feature, limit))
    }
}

/// Handler evaluating gates against a user's fresh billing status.
pub struct CheckEntitlementHandler {
    tier_source: Arc<dyn TierSource>,
}

impl CheckEntitlementHandler {
    pub fn new(tier_source: Arc<dyn TierSource>) -> Self {
        Self { tier_source }
    }

    pub async fn handle(
        &self,
        query: CheckEntitlementQuery,
    ) -> Result<CheckEntitlementResult, DomainError> {
        // Validate keys before touching billing.
        let (feature, limit) = query.parse()?;

        let snapshot = load_snapshot(self.tier_source.as_ref(), &query.user_id).await?;
        let rights = snapshot.rights();

        let result = CheckEntitlementResult {
            tier: rights.tier,
            requires_upgrade: requires_upgrade(&rights, feature, limit),
            feature_granted: feature.map(|key| can_access(&rights, key)),
            within_limit: limit.map(|check| is_within_limit(&rights, check.current, check.key)),
            remaining: limit.map(|check| remaining_usage(&rights, check.current, check.key)),
            reason: upgrade_reason(&rights, feature, limit),
        };

        tracing::debug!(
            user_id = %query.user_id,
            tier = %result.tier,
            requires_upgrade = result.requires_upgrade,
            "Entitlement checked"
        );

        Ok(result)
    }
}
