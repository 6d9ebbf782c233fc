//! Point-in-time subscription state for one user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{resolve_rights, RightsRecord, SubscriptionTier};
use crate::domain::foundation::UserId;

/// Billing status as reported by the tier source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub subscribed: bool,
    #[serde(default)]
    pub tier: Option<String>,
}

impl SubscriptionStatus {
    pub fn unsubscribed() -> Self {
        Self::default()
    }

    pub fn subscribed(tier: impl Into<String>) -> Self {
        Self {
            subscribed: true,
            tier: Some(tier.into()),
        }
    }
}

/// An atomic `(subscribed, tier)` reading for a user.
///
/// Rights are always derived from a whole snapshot, never assembled from
/// separate reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSnapshot {
    pub user_id: Option<UserId>,
    pub subscribed: bool,
    pub tier: Option<String>,
    pub observed_at: DateTime<Utc>,
}

impl SubscriptionSnapshot {
    pub fn new(user_id: Option<UserId>, status: SubscriptionStatus) -> Self {
        Self {
            user_id,
            subscribed: status.subscribed,
            tier: status.tier,
            observed_at: Utc::now(),
        }
    }

    /// Snapshot for a signed-out session or a user whose status is unknown.
    pub fn unsubscribed(user_id: Option<UserId>) -> Self {
        Self::new(user_id, SubscriptionStatus::unsubscribed())
    }

    pub fn rights(&self) -> RightsRecord {
        resolve_rights(self.subscribed, self.tier.as_deref())
    }

    /// The tier whose rights actually apply.
    pub fn effective_tier(&self) -> SubscriptionTier {
        self.rights().tier
    }

    pub fn belongs_to(&self, user_id: Option<&UserId>) -> bool {
        self.user_id.as_ref() == user_id
    }

    /// Same billing facts, ignoring when they were observed.
    pub fn same_status(&self, other: &SubscriptionSnapshot) -> bool {
        self.user_id == other.user_id
            && self.subscribed == other.subscribed
            && self.tier == other.tier
    }
}
