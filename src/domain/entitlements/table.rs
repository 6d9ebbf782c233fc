//! The static tier → rights table.
//!
//! # Tier Configuration
//!
//! | Tier | Barbers | Appts/mo | Txns/mo | Services/barber | Support |
//! |------|---------|----------|---------|-----------------|---------|
//! | None | 1 | 50 | 100 | 5 | Community |
//! | Basic | 2 | 200 | 500 | 10 | Email |
//! | Premium | 5 | 1000 | 2500 | 25 | Priority |
//! | Enterprise | Unlimited | Unlimited | Unlimited | Unlimited | Dedicated |
//! | Lifetime | Unlimited | Unlimited | Unlimited | Unlimited | Priority |
//!
//! When editing, keep every field non-decreasing along
//! None → Basic → Premium → Enterprise, and Premium → Lifetime.
//! The monotonicity tests below check this.

use super::{Limit, RightsRecord, SubscriptionTier, SupportLevel};

const NONE_RIGHTS: RightsRecord = RightsRecord {
    tier: SubscriptionTier::None,
    max_barbers: Limit::Finite(1),
    max_appointments_per_month: Limit::Finite(50),
    max_transactions_per_month: Limit::Finite(100),
    max_services_per_barber: Limit::Finite(5),
    can_access_advanced_stats: false,
    can_export_reports: false,
    can_send_emails: false,
    can_manage_inventory: false,
    can_access_customer_portal: false,
    can_use_custom_pricing: false,
    can_access_multi_location: false,
    can_access_api: false,
    can_use_white_label: false,
    can_use_integrations: false,
    can_use_advanced_booking: false,
    can_remove_branding: false,
    can_use_custom_domain: false,
    support_level: SupportLevel::Community,
};

const BASIC_RIGHTS: RightsRecord = RightsRecord {
    tier: SubscriptionTier::Basic,
    max_barbers: Limit::Finite(2),
    max_appointments_per_month: Limit::Finite(200),
    max_transactions_per_month: Limit::Finite(500),
    max_services_per_barber: Limit::Finite(10),
    can_access_advanced_stats: false,
    can_export_reports: true,
    can_send_emails: true,
    can_manage_inventory: false,
    can_access_customer_portal: false,
    can_use_custom_pricing: false,
    can_access_multi_location: false,
    can_access_api: false,
    can_use_white_label: false,
    can_use_integrations: false,
    can_use_advanced_booking: false,
    can_remove_branding: false,
    can_use_custom_domain: false,
    support_level: SupportLevel::Email,
};

const PREMIUM_RIGHTS: RightsRecord = RightsRecord {
    tier: SubscriptionTier::Premium,
    max_barbers: Limit::Finite(5),
    max_appointments_per_month: Limit::Finite(1000),
    max_transactions_per_month: Limit::Finite(2500),
    max_services_per_barber: Limit::Finite(25),
    can_access_advanced_stats: true,
    can_export_reports: true,
    can_send_emails: true,
    can_manage_inventory: true,
    can_access_customer_portal: true,
    can_use_custom_pricing: true,
    can_access_multi_location: false,
    can_access_api: false,
    can_use_white_label: false,
    can_use_integrations: false,
    can_use_advanced_booking: true,
    can_remove_branding: false,
    can_use_custom_domain: false,
    support_level: SupportLevel::Priority,
};

const ENTERPRISE_RIGHTS: RightsRecord = RightsRecord {
    tier: SubscriptionTier::Enterprise,
    max_barbers: Limit::Unlimited,
    max_appointments_per_month: Limit::Unlimited,
    max_transactions_per_month: Limit::Unlimited,
    max_services_per_barber: Limit::Unlimited,
    can_access_advanced_stats: true,
    can_export_reports: true,
    can_send_emails: true,
    can_manage_inventory: true,
    can_access_customer_portal: true,
    can_use_custom_pricing: true,
    can_access_multi_location: true,
    can_access_api: true,
    can_use_white_label: true,
    can_use_integrations: true,
    can_use_advanced_booking: true,
    can_remove_branding: true,
    can_use_custom_domain: true,
    support_level: SupportLevel::Dedicated,
};

// Lifetime: enterprise usage without white label, custom domain, or
// dedicated support.
const LIFETIME_RIGHTS: RightsRecord = RightsRecord {
    tier: SubscriptionTier::Lifetime,
    max_barbers: Limit::Unlimited,
    max_appointments_per_month: Limit::Unlimited,
    max_transactions_per_month: Limit::Unlimited,
    max_services_per_barber: Limit::Unlimited,
    can_access_advanced_stats: true,
    can_export_reports: true,
    can_send_emails: true,
    can_manage_inventory: true,
    can_access_customer_portal: true,
    can_use_custom_pricing: true,
    can_access_multi_location: true,
    can_access_api: true,
    can_use_white_label: false,
    can_use_integrations: true,
    can_use_advanced_booking: true,
    can_remove_branding: true,
    can_use_custom_domain: false,
    support_level: SupportLevel::Priority,
};

impl RightsRecord {
    /// Get the rights for a specific tier.
    pub fn for_tier(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::None => NONE_RIGHTS,
            SubscriptionTier::Basic => BASIC_RIGHTS,
            SubscriptionTier::Premium => PREMIUM_RIGHTS,
            SubscriptionTier::Enterprise => ENTERPRISE_RIGHTS,
            SubscriptionTier::Lifetime => LIFETIME_RIGHTS,
        }
    }

    /// The least-privilege record, used for absent or unrecognized tiers.
    pub fn none() -> Self {
        NONE_RIGHTS
    }
}

/// Looks up the rights for a raw tier identifier. Never fails.
///
/// Absent, empty, or unrecognized identifiers get the `none` record.
pub fn lookup(tier: Option<&str>) -> RightsRecord {
    RightsRecord::for_tier(SubscriptionTier::from_identifier(tier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entitlements::{FeatureKey, LimitKey};
    use proptest::prelude::*;

    // Tier Configuration Tests

    #[test]
    fn none_tier_has_one_barber() {
        assert_eq!(RightsRecord::none().max_barbers, Limit::Finite(1));
    }

    #[test]
    fn none_tier_has_no_paid_features() {
        let rights = RightsRecord::none();
        for key in FeatureKey::ALL {
            assert!(!rights.feature(key), "{} should be off for none", key);
        }
        assert_eq!(rights.support_level, SupportLevel::Community);
    }

    #[test]
    fn basic_tier_can_export_and_email() {
        let rights = RightsRecord::for_tier(SubscriptionTier::Basic);
        assert!(rights.can_export_reports);
        assert!(rights.can_send_emails);
        assert!(!rights.can_access_advanced_stats);
    }

    #[test]
    fn premium_tier_has_five_barbers() {
        let rights = RightsRecord::for_tier(SubscriptionTier::Premium);
        assert_eq!(rights.max_barbers, Limit::Finite(5));
        assert!(rights.can_access_advanced_stats);
        assert!(!rights.can_access_api);
    }

    #[test]
    fn enterprise_tier_is_unlimited_everywhere() {
        let rights = RightsRecord::for_tier(SubscriptionTier::Enterprise);
        for key in LimitKey::ALL {
            assert!(rights.limit(key).is_unlimited(), "{} should be unlimited", key);
        }
        for key in FeatureKey::ALL {
            assert!(rights.feature(key), "{} should be on for enterprise", key);
        }
    }

    #[test]
    fn lifetime_tier_lacks_white_label_and_custom_domain() {
        let rights = RightsRecord::for_tier(SubscriptionTier::Lifetime);
        assert!(!rights.can_use_white_label);
        assert!(!rights.can_use_custom_domain);
        assert_eq!(rights.support_level, SupportLevel::Priority);
    }

    #[test]
    fn every_record_carries_its_own_tier() {
        for tier in SubscriptionTier::ALL {
            assert_eq!(RightsRecord::for_tier(tier).tier, tier);
        }
    }

    // Monotonicity Tests

    #[test]
    fn rights_never_shrink_along_upgrade_ladder() {
        let ladder = [
            SubscriptionTier::None,
            SubscriptionTier::Basic,
            SubscriptionTier::Premium,
            SubscriptionTier::Enterprise,
        ];
        for pair in ladder.windows(2) {
            let lower = RightsRecord::for_tier(pair[0]);
            let higher = RightsRecord::for_tier(pair[1]);
            assert!(
                higher.covers(&lower),
                "{:?} must cover {:?}",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn lifetime_covers_premium() {
        let premium = RightsRecord::for_tier(SubscriptionTier::Premium);
        let lifetime = RightsRecord::for_tier(SubscriptionTier::Lifetime);
        assert!(lifetime.covers(&premium));
    }

    #[test]
    fn lifetime_support_is_narrower_than_enterprise() {
        let enterprise = RightsRecord::for_tier(SubscriptionTier::Enterprise);
        let lifetime = RightsRecord::for_tier(SubscriptionTier::Lifetime);
        assert!(lifetime.support_level < enterprise.support_level);
    }

    // Lookup Tests

    #[test]
    fn lookup_absent_tier_is_none() {
        assert_eq!(lookup(None), RightsRecord::none());
    }

    #[test]
    fn lookup_empty_string_is_none() {
        assert_eq!(lookup(Some("")), RightsRecord::none());
    }

    #[test]
    fn lookup_known_tier_is_case_insensitive() {
        assert_eq!(
            lookup(Some("Premium")),
            RightsRecord::for_tier(SubscriptionTier::Premium)
        );
    }

    proptest! {
        #[test]
        fn lookup_unknown_identifier_is_none(raw in "\\PC*") {
            prop_assume!(SubscriptionTier::parse(&raw).is_none());
            prop_assert_eq!(lookup(Some(&raw)), RightsRecord::none());
        }
    }
}
