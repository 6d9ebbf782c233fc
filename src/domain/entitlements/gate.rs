//! Feature gating.
//!
//! A gate decides what a caller should show for protected content: the
//! content itself, its fallback, an upgrade prompt, or nothing. The decision
//! is derived from [`requires_upgrade`] alone; the gate is not a second
//! source of truth about rights.

use serde::{Deserialize, Serialize};

use super::resolver::{
    get_limit, minimum_tier_for_feature, minimum_tier_for_limit, requires_upgrade, LimitCheck,
};
use super::{FeatureKey, LimitKey, RightsRecord, SubscriptionTier};

/// Why an upgrade is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpgradeReason {
    /// Feature requires a higher tier.
    FeatureNotIncluded {
        feature: FeatureKey,
        /// Cheapest tier that includes it, if any is for sale.
        required_tier: Option<SubscriptionTier>,
    },

    /// Usage limit reached for the current tier.
    LimitReached {
        limit: LimitKey,
        current: u32,
        max: u32,
        required_tier: Option<SubscriptionTier>,
    },
}

impl UpgradeReason {
    /// Get a user-facing message for the upgrade reason.
    pub fn user_message(&self) -> String {
        match self {
            UpgradeReason::FeatureNotIncluded {
                feature,
                required_tier: Some(tier),
            } => format!(
                "{} requires a {} subscription or higher.",
                feature.label(),
                tier.display_name()
            ),
            UpgradeReason::FeatureNotIncluded {
                feature,
                required_tier: None,
            } => format!("{} is not available on your plan.", feature.label()),
            UpgradeReason::LimitReached {
                limit,
                current,
                max,
                ..
            } => format!(
                "You've reached the limit of {} {} (currently have {}). Upgrade for more.",
                max,
                limit.resource(),
                current
            ),
        }
    }

    pub fn required_tier(&self) -> Option<SubscriptionTier> {
        match self {
            UpgradeReason::FeatureNotIncluded { required_tier, .. }
            | UpgradeReason::LimitReached { required_tier, .. } => *required_tier,
        }
    }
}

impl std::fmt::Display for UpgradeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

/// Explains the first failing condition of a gate, or `None` if nothing fails.
///
/// The feature is reported before the limit when both fail.
pub fn upgrade_reason(
    rights: &RightsRecord,
    feature: Option<FeatureKey>,
    limit: Option<LimitCheck>,
) -> Option<UpgradeReason> {
    if let Some(feature) = feature {
        if requires_upgrade(rights, Some(feature), None) {
            return Some(UpgradeReason::FeatureNotIncluded {
                feature,
                required_tier: minimum_tier_for_feature(feature),
            });
        }
    }
    if let Some(check) = limit {
        if requires_upgrade(rights, None, Some(check)) {
            // A failing check always has a finite limit; unlimited admits every count.
            let max = get_limit(rights, check.key).finite().unwrap_or(u32::MAX);
            return Some(UpgradeReason::LimitReached {
                limit: check.key,
                current: check.current,
                max,
                required_tier: minimum_tier_for_limit(check.key, check.current),
            });
        }
    }
    None
}

/// Upgrade prompt payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePrompt {
    pub reason: UpgradeReason,
    pub message: String,
}

/// What to render for gated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Render,
    Fallback,
    UpgradePrompt(UpgradePrompt),
    Hidden,
}

impl GateDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GateDecision::Render)
    }
}

/// A gate over a feature and/or a usage limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureGate {
    feature: Option<FeatureKey>,
    limit: Option<LimitCheck>,
    has_fallback: bool,
    show_upgrade_prompt: bool,
}

impl Default for FeatureGate {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureGate {
    /// An ungated gate: always renders until a feature or limit is required.
    pub fn new() -> Self {
        Self {
            feature: None,
            limit: None,
            has_fallback: false,
            show_upgrade_prompt: true,
        }
    }

    pub fn for_feature(feature: FeatureKey) -> Self {
        Self::new().requiring_feature(feature)
    }

    pub fn for_limit(key: LimitKey, current: u32) -> Self {
        Self::new().requiring_limit(key, current)
    }

    pub fn requiring_feature(mut self, feature: FeatureKey) -> Self {
        self.feature = Some(feature);
        self
    }

    pub fn requiring_limit(mut self, key: LimitKey, current: u32) -> Self {
        self.limit = Some(LimitCheck::new(key, current));
        self
    }

    pub fn with_fallback(mut self) -> Self {
        self.has_fallback = true;
        self
    }

    pub fn without_upgrade_prompt(mut self) -> Self {
        self.show_upgrade_prompt = false;
        self
    }

    pub fn evaluate(&self, rights: &RightsRecord) -> GateDecision {
        if !requires_upgrade(rights, self.feature, self.limit) {
            return GateDecision::Render;
        }
        if self.has_fallback {
            return GateDecision::Fallback;
        }
        if !self.show_upgrade_prompt {
            return GateDecision::Hidden;
        }
        match upgrade_reason(rights, self.feature, self.limit) {
            Some(reason) => GateDecision::UpgradePrompt(UpgradePrompt {
                message: reason.user_message(),
                reason,
            }),
            None => GateDecision::Hidden,
        }
    }
}
