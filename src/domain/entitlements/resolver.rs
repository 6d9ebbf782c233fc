//! Entitlement queries.
//!
//! Pure functions over a [`RightsRecord`]. No I/O, no state: callers pass the
//! latest `(subscribed, tier)` pair and their own usage counts.

use serde::{Deserialize, Serialize};

use super::table::lookup;
use super::{FeatureKey, Limit, LimitKey, RightsRecord, SubscriptionTier};

/// A request to check one usage limit against the caller's current count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitCheck {
    pub key: LimitKey,
    pub current: u32,
}

impl LimitCheck {
    pub fn new(key: LimitKey, current: u32) -> Self {
        Self { key, current }
    }
}

/// Resolves the rights for a billing status.
///
/// An unsubscribed account gets `none` rights whatever the tier string says,
/// so a stale tier left behind after cancellation never grants paid rights.
pub fn resolve_rights(subscribed: bool, tier: Option<&str>) -> RightsRecord {
    if !subscribed {
        return RightsRecord::none();
    }
    lookup(tier)
}

pub fn can_access(rights: &RightsRecord, feature: FeatureKey) -> bool {
    rights.feature(feature)
}

/// Returns the limit. Use [`Limit::as_f64`] for a number with unlimited as +∞.
pub fn get_limit(rights: &RightsRecord, key: LimitKey) -> Limit {
    rights.limit(key)
}

/// True iff `current` is strictly below the limit.
///
/// A count equal to the limit is not within it: that is the point where
/// creating one more resource must be blocked.
pub fn is_within_limit(rights: &RightsRecord, current: u32, key: LimitKey) -> bool {
    get_limit(rights, key).admits(current)
}

/// Remaining quota, floored at zero; `Unlimited` for unlimited limits.
pub fn remaining_usage(rights: &RightsRecord, current: u32, key: LimitKey) -> Limit {
    get_limit(rights, key).remaining_after(current)
}

/// True if the requested feature is denied or the requested limit check fails.
///
/// With neither a feature nor a limit check there is nothing to gate, so no
/// upgrade is required.
pub fn requires_upgrade(
    rights: &RightsRecord,
    feature: Option<FeatureKey>,
    limit: Option<LimitCheck>,
) -> bool {
    let feature_denied = feature.is_some_and(|key| !can_access(rights, key));
    let limit_exceeded =
        limit.is_some_and(|check| !is_within_limit(rights, check.current, check.key));
    feature_denied || limit_exceeded
}

/// Cheapest purchasable tier that grants `feature`.
pub fn minimum_tier_for_feature(feature: FeatureKey) -> Option<SubscriptionTier> {
    SubscriptionTier::UPGRADE_PATH
        .into_iter()
        .find(|tier| RightsRecord::for_tier(*tier).feature(feature))
}

/// Cheapest purchasable tier whose limit admits `current`.
pub fn minimum_tier_for_limit(key: LimitKey, current: u32) -> Option<SubscriptionTier> {
    SubscriptionTier::UPGRADE_PATH
        .into_iter()
        .find(|tier| RightsRecord::for_tier(*tier).limit(key).admits(current))
}
