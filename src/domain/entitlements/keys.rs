//! Closed sets of feature and limit keys.
//!
//! Keys arriving as strings (query parameters, JSON) are parsed here. An
//! unknown name is an [`EntitlementError`], never a silent denial.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::EntitlementError;

/// A boolean capability in a rights record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureKey {
    CanAccessAdvancedStats,
    CanExportReports,
    CanSendEmails,
    CanManageInventory,
    CanAccessCustomerPortal,
    CanUseCustomPricing,
    CanAccessMultiLocation,
    CanAccessApi,
    CanUseWhiteLabel,
    CanUseIntegrations,
    CanUseAdvancedBooking,
    CanRemoveBranding,
    CanUseCustomDomain,
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 13] = [
        FeatureKey::CanAccessAdvancedStats,
        FeatureKey::CanExportReports,
        FeatureKey::CanSendEmails,
        FeatureKey::CanManageInventory,
        FeatureKey::CanAccessCustomerPortal,
        FeatureKey::CanUseCustomPricing,
        FeatureKey::CanAccessMultiLocation,
        FeatureKey::CanAccessApi,
        FeatureKey::CanUseWhiteLabel,
        FeatureKey::CanUseIntegrations,
        FeatureKey::CanUseAdvancedBooking,
        FeatureKey::CanRemoveBranding,
        FeatureKey::CanUseCustomDomain,
    ];

    /// Wire name of the key (camelCase field name).
    pub fn name(&self) -> &'static str {
        match self {
            FeatureKey::CanAccessAdvancedStats => "canAccessAdvancedStats",
            FeatureKey::CanExportReports => "canExportReports",
            FeatureKey::CanSendEmails => "canSendEmails",
            FeatureKey::CanManageInventory => "canManageInventory",
            FeatureKey::CanAccessCustomerPortal => "canAccessCustomerPortal",
            FeatureKey::CanUseCustomPricing => "canUseCustomPricing",
            FeatureKey::CanAccessMultiLocation => "canAccessMultiLocation",
            FeatureKey::CanAccessApi => "canAccessApi",
            FeatureKey::CanUseWhiteLabel => "canUseWhiteLabel",
            FeatureKey::CanUseIntegrations => "canUseIntegrations",
            FeatureKey::CanUseAdvancedBooking => "canUseAdvancedBooking",
            FeatureKey::CanRemoveBranding => "canRemoveBranding",
            FeatureKey::CanUseCustomDomain => "canUseCustomDomain",
        }
    }

    /// Human readable label, used in upgrade prompts.
    pub fn label(&self) -> &'static str {
        match self {
            FeatureKey::CanAccessAdvancedStats => "Advanced statistics",
            FeatureKey::CanExportReports => "Report export",
            FeatureKey::CanSendEmails => "Email sending",
            FeatureKey::CanManageInventory => "Inventory management",
            FeatureKey::CanAccessCustomerPortal => "Customer portal",
            FeatureKey::CanUseCustomPricing => "Custom pricing",
            FeatureKey::CanAccessMultiLocation => "Multi-location access",
            FeatureKey::CanAccessApi => "API access",
            FeatureKey::CanUseWhiteLabel => "White-label branding",
            FeatureKey::CanUseIntegrations => "Third-party integrations",
            FeatureKey::CanUseAdvancedBooking => "Advanced booking",
            FeatureKey::CanRemoveBranding => "Branding removal",
            FeatureKey::CanUseCustomDomain => "Custom domain",
        }
    }
}

impl FromStr for FeatureKey {
    type Err = EntitlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureKey::ALL
            .iter()
            .copied()
            .find(|key| spelled_as(s, key.name()))
            .ok_or_else(|| EntitlementError::UnknownFeatureKey(s.to_string()))
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A numeric usage limit in a rights record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LimitKey {
    MaxBarbers,
    MaxAppointmentsPerMonth,
    MaxTransactionsPerMonth,
    MaxServicesPerBarber,
}

impl LimitKey {
    pub const ALL: [LimitKey; 4] = [
        LimitKey::MaxBarbers,
        LimitKey::MaxAppointmentsPerMonth,
        LimitKey::MaxTransactionsPerMonth,
        LimitKey::MaxServicesPerBarber,
    ];

    /// Wire name of the key (camelCase field name).
    pub fn name(&self) -> &'static str {
        match self {
            LimitKey::MaxBarbers => "maxBarbers",
            LimitKey::MaxAppointmentsPerMonth => "maxAppointmentsPerMonth",
            LimitKey::MaxTransactionsPerMonth => "maxTransactionsPerMonth",
            LimitKey::MaxServicesPerBarber => "maxServicesPerBarber",
        }
    }

    /// Plural noun for the counted resource, used in upgrade prompts.
    pub fn resource(&self) -> &'static str {
        match self {
            LimitKey::MaxBarbers => "barbers",
            LimitKey::MaxAppointmentsPerMonth => "appointments per month",
            LimitKey::MaxTransactionsPerMonth => "transactions per month",
            LimitKey::MaxServicesPerBarber => "services per barber",
        }
    }
}

impl FromStr for LimitKey {
    type Err = EntitlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LimitKey::ALL
            .iter()
            .copied()
            .find(|key| spelled_as(s, key.name()))
            .ok_or_else(|| EntitlementError::UnknownLimitKey(s.to_string()))
    }
}

impl fmt::Display for LimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Accepts the camelCase wire name or its exact snake_case form.
fn spelled_as(input: &str, name: &str) -> bool {
    let input = input.trim();
    input == name || input == snake_case(name)
}

fn snake_case(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for c in camel.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
