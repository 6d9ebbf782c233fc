//! Rights records: the full capability and limit set of a tier.

use serde::{Deserialize, Serialize};

use super::{FeatureKey, Limit, LimitKey, SubscriptionTier};

/// Support level included with a tier. Ordered from least to most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportLevel {
    Community,
    Email,
    Priority,
    Dedicated,
}

/// Immutable rights of a subscription tier.
///
/// Obtained from the static table via [`RightsRecord::for_tier`] or
/// [`super::resolve_rights`]; never built field by field at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RightsRecord {
    /// The tier these rights belong to.
    pub tier: SubscriptionTier,

    pub max_barbers: Limit,
    pub max_appointments_per_month: Limit,
    pub max_transactions_per_month: Limit,
    pub max_services_per_barber: Limit,

    pub can_access_advanced_stats: bool,
    pub can_export_reports: bool,
    pub can_send_emails: bool,
    pub can_manage_inventory: bool,
    pub can_access_customer_portal: bool,
    pub can_use_custom_pricing: bool,
    pub can_access_multi_location: bool,
    pub can_access_api: bool,
    pub can_use_white_label: bool,
    pub can_use_integrations: bool,
    pub can_use_advanced_booking: bool,
    pub can_remove_branding: bool,
    pub can_use_custom_domain: bool,

    pub support_level: SupportLevel,
}

impl RightsRecord {
    /// Boolean capability by key.
    pub fn feature(&self, key: FeatureKey) -> bool {
        match key {
            FeatureKey::CanAccessAdvancedStats => self.can_access_advanced_stats,
            FeatureKey::CanExportReports => self.can_export_reports,
            FeatureKey::CanSendEmails => self.can_send_emails,
            FeatureKey::CanManageInventory => self.can_manage_inventory,
            FeatureKey::CanAccessCustomerPortal => self.can_access_customer_portal,
            FeatureKey::CanUseCustomPricing => self.can_use_custom_pricing,
            FeatureKey::CanAccessMultiLocation => self.can_access_multi_location,
            FeatureKey::CanAccessApi => self.can_access_api,
            FeatureKey::CanUseWhiteLabel => self.can_use_white_label,
            FeatureKey::CanUseIntegrations => self.can_use_integrations,
            FeatureKey::CanUseAdvancedBooking => self.can_use_advanced_booking,
            FeatureKey::CanRemoveBranding => self.can_remove_branding,
            FeatureKey::CanUseCustomDomain => self.can_use_custom_domain,
        }
    }

    /// Numeric limit by key.
    pub fn limit(&self, key: LimitKey) -> Limit {
        match key {
            LimitKey::MaxBarbers => self.max_barbers,
            LimitKey::MaxAppointmentsPerMonth => self.max_appointments_per_month,
            LimitKey::MaxTransactionsPerMonth => self.max_transactions_per_month,
            LimitKey::MaxServicesPerBarber => self.max_services_per_barber,
        }
    }

    /// Returns true if every field of `self` is at least as generous as `other`.
    pub fn covers(&self, other: &RightsRecord) -> bool {
        FeatureKey::ALL
            .iter()
            .all(|key| self.feature(*key) || !other.feature(*key))
            && LimitKey::ALL
                .iter()
                .all(|key| self.limit(*key) >= other.limit(*key))
            && self.support_level >= other.support_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_levels_are_ordered() {
        assert!(SupportLevel::Community < SupportLevel::Email);
        assert!(SupportLevel::Email < SupportLevel::Priority);
        assert!(SupportLevel::Priority < SupportLevel::Dedicated);
    }

    #[test]
    fn record_covers_itself() {
        let rights = RightsRecord::for_tier(SubscriptionTier::Premium);
        assert!(rights.covers(&rights));
    }

    #[test]
    fn lower_tier_does_not_cover_higher() {
        let none = RightsRecord::for_tier(SubscriptionTier::None);
        let premium = RightsRecord::for_tier(SubscriptionTier::Premium);
        assert!(!none.covers(&premium));
    }

    #[test]
    fn serializes_with_camel_case_fields_and_null_unlimited() {
        let json = serde_json::to_value(RightsRecord::for_tier(SubscriptionTier::Enterprise)).unwrap();
        assert_eq!(json["tier"], "enterprise");
        assert!(json["maxBarbers"].is_null());
        assert_eq!(json["canUseWhiteLabel"], true);
        assert_eq!(json["supportLevel"], "dedicated");
    }

    #[test]
    fn finite_limits_serialize_as_numbers() {
        let json = serde_json::to_value(RightsRecord::for_tier(SubscriptionTier::Premium)).unwrap();
        assert_eq!(json["maxBarbers"], 5);
    }

    #[test]
    fn legacy_sentinel_in_stored_record_reads_as_unlimited() {
        let mut json = serde_json::to_value(RightsRecord::for_tier(SubscriptionTier::Basic)).unwrap();
        json["maxBarbers"] = serde_json::json!(-1);

        let rights: RightsRecord = serde_json::from_value(json).unwrap();
        assert_eq!(rights.max_barbers, Limit::Unlimited);
        assert!(rights.limit(LimitKey::MaxBarbers).admits(10_000));
    }

    #[test]
    fn stored_record_with_bad_limit_is_rejected() {
        let mut json = serde_json::to_value(RightsRecord::for_tier(SubscriptionTier::Basic)).unwrap();
        json["maxServicesPerBarber"] = serde_json::json!(-7);

        assert!(serde_json::from_value::<RightsRecord>(json).is_err());
    }
}
