//! HTTP DTOs (Data Transfer Objects) for entitlement endpoints.
//!
//! JSON field names are camelCase to match the client's rights record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::application::handlers::entitlements::{
    CheckEntitlementResult, GetRightsResult, GetUsageReportResult,
};
use crate::domain::entitlements::{
    Limit, LimitKey, RightsRecord, SubscriptionTier, UpgradeReason, UsageEntry,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string of `GET /api/entitlements/check`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckEntitlementParams {
    /// Feature key, e.g. `canAccessAdvancedStats`.
    #[serde(default)]
    pub feature: Option<String>,
    /// Limit key, e.g. `maxBarbers`.
    #[serde(default)]
    pub limit: Option<String>,
    /// Current count of the limited resource.
    #[serde(default)]
    pub current: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for the caller's rights.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RightsResponse {
    pub user_id: String,
    pub subscribed: bool,
    pub tier: SubscriptionTier,
    pub rights: RightsRecord,
}

impl From<GetRightsResult> for RightsResponse {
    fn from(result: GetRightsResult) -> Self {
        Self {
            user_id: result.user_id.to_string(),
            subscribed: result.subscribed,
            tier: result.tier,
            rights: result.rights,
        }
    }
}

/// Response for an entitlement check.
///
/// `remaining` is omitted when no limit was checked and `null` when the
/// limit is unlimited.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckEntitlementResponse {
    pub tier: SubscriptionTier,
    pub requires_upgrade: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_granted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_limit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Limit>,
    /// Cheapest tier that lifts the restriction.
    pub required_tier: Option<SubscriptionTier>,
    /// User-facing upgrade message.
    pub message: Option<String>,
    pub reason: Option<UpgradeReason>,
}

impl From<CheckEntitlementResult> for CheckEntitlementResponse {
    fn from(result: CheckEntitlementResult) -> Self {
        Self {
            tier: result.tier,
            requires_upgrade: result.requires_upgrade,
            feature_granted: result.feature_granted,
            within_limit: result.within_limit,
            remaining: result.remaining,
            required_tier: result.reason.as_ref().and_then(UpgradeReason::required_tier),
            message: result.reason.as_ref().map(UpgradeReason::user_message),
            reason: result.reason,
        }
    }
}

/// Response for a usage report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReportResponse {
    pub tier: SubscriptionTier,
    pub entries: Vec<UsageEntry>,
    /// Limits that block creating one more resource.
    pub exhausted: Vec<LimitKey>,
}

impl From<GetUsageReportResult> for UsageReportResponse {
    fn from(result: GetUsageReportResult) -> Self {
        Self {
            tier: result.tier,
            exhausted: result.report.exhausted(),
            entries: result.report.entries,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }

    pub fn with_details(mut self, details: HashMap<String, String>) -> Self {
        self.details = details;
        self
    }
}
