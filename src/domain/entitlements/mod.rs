//! Entitlements domain module.
//!
//! Maps a subscription tier to the features and usage limits it grants, and
//! answers access and quota questions against caller-supplied counts.
//!
//! # Module Structure
//!
//! - `tier` - SubscriptionTier levels
//! - `limit` - Finite/unlimited usage limits
//! - `keys` - Closed feature and limit key sets
//! - `rights` - RightsRecord and SupportLevel
//! - `table` - Static tier → rights table
//! - `resolver` - Access and quota queries
//! - `usage` - Usage counts and reports
//! - `gate` - Feature gate decisions and upgrade prompts
//! - `snapshot` - Subscription status snapshots

mod errors;
mod gate;
mod keys;
mod limit;
mod resolver;
mod rights;
mod snapshot;
mod table;
mod tier;
mod usage;

pub use errors::EntitlementError;
pub use gate::{upgrade_reason, FeatureGate, GateDecision, UpgradePrompt, UpgradeReason};
pub use keys::{FeatureKey, LimitKey};
pub use limit::{Limit, UNLIMITED_SENTINEL};
pub use resolver::{
    can_access, get_limit, is_within_limit, minimum_tier_for_feature, minimum_tier_for_limit,
    remaining_usage, requires_upgrade, resolve_rights, LimitCheck,
};
pub use rights::{RightsRecord, SupportLevel};
pub use snapshot::{SubscriptionSnapshot, SubscriptionStatus};
pub use table::lookup;
pub use tier::SubscriptionTier;
pub use usage::{usage_report, UsageCounts, UsageEntry, UsageReport};
