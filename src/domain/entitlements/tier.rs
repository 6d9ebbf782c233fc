//! Subscription tier definitions.
//!
//! Represents the subscription tier levels a salon account can hold.

use serde::{Deserialize, Serialize};

/// Salon subscription tier.
///
/// Determines feature access and usage limits. Parsing from billing data never
/// fails: anything unrecognized becomes [`SubscriptionTier::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// No subscription - single chair, core checkout and calendar only.
    None,

    /// Basic tier - small salons.
    /// - 2 barbers
    /// - Report export and email sending
    Basic,

    /// Premium tier - established salons.
    /// - 5 barbers
    /// - Advanced statistics, inventory, customer portal
    Premium,

    /// Enterprise tier - multi-location businesses.
    /// - Unlimited everything
    /// - White label, custom domain, dedicated support
    Enterprise,

    /// One-time lifetime purchase.
    /// - Unlimited usage, no white label or custom domain
    Lifetime,
}

impl SubscriptionTier {
    /// Every tier, in table order.
    pub const ALL: [SubscriptionTier; 5] = [
        SubscriptionTier::None,
        SubscriptionTier::Basic,
        SubscriptionTier::Premium,
        SubscriptionTier::Enterprise,
        SubscriptionTier::Lifetime,
    ];

    /// Tiers a customer can currently subscribe to, cheapest first.
    ///
    /// Lifetime is not sold anymore and is never suggested as an upgrade.
    pub const UPGRADE_PATH: [SubscriptionTier; 3] = [
        SubscriptionTier::Basic,
        SubscriptionTier::Premium,
        SubscriptionTier::Enterprise,
    ];

    /// Parses a tier identifier coming from billing data.
    ///
    /// Case-insensitive and whitespace tolerant. Returns `None` for absent,
    /// empty, or unrecognized identifiers.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" => Some(SubscriptionTier::None),
            "basic" => Some(SubscriptionTier::Basic),
            "premium" => Some(SubscriptionTier::Premium),
            "enterprise" => Some(SubscriptionTier::Enterprise),
            "lifetime" => Some(SubscriptionTier::Lifetime),
            _ => None,
        }
    }

    /// Parses a tier identifier, falling back to [`SubscriptionTier::None`].
    pub fn from_identifier(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or(SubscriptionTier::None)
    }

    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, SubscriptionTier::None)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionTier::None => "No subscription",
            SubscriptionTier::Basic => "Basic",
            SubscriptionTier::Premium => "Premium",
            SubscriptionTier::Enterprise => "Enterprise",
            SubscriptionTier::Lifetime => "Lifetime",
        }
    }

    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Enterprise and Lifetime share the top rank; they are not comparable
    /// field by field.
    pub fn rank(&self) -> u8 {
        match self {
            SubscriptionTier::None => 0,
            SubscriptionTier::Basic => 1,
            SubscriptionTier::Premium => 2,
            SubscriptionTier::Enterprise | SubscriptionTier::Lifetime => 3,
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
