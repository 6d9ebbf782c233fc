//! Usage counts supplied by callers and the per-limit report built from them.

use serde::{Deserialize, Serialize};

use super::resolver::{get_limit, is_within_limit, remaining_usage};
use super::{Limit, LimitKey, RightsRecord};

/// Current resource counts for an account. The entitlement model never
/// counts anything itself; these come from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCounts {
    #[serde(default)]
    pub barbers: u32,
    #[serde(default)]
    pub appointments_this_month: u32,
    #[serde(default)]
    pub transactions_this_month: u32,
    /// Highest number of services configured on any single barber.
    #[serde(default)]
    pub services_per_barber: u32,
}

impl UsageCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// The count measured against a given limit.
    pub fn count(&self, key: LimitKey) -> u32 {
        match key {
            LimitKey::MaxBarbers => self.barbers,
            LimitKey::MaxAppointmentsPerMonth => self.appointments_this_month,
            LimitKey::MaxTransactionsPerMonth => self.transactions_this_month,
            LimitKey::MaxServicesPerBarber => self.services_per_barber,
        }
    }
}

/// One line of a usage report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEntry {
    pub key: LimitKey,
    pub current: u32,
    pub limit: Limit,
    pub remaining: Limit,
    pub within_limit: bool,
}

/// Usage against every limit of a rights record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    pub entries: Vec<UsageEntry>,
}

impl UsageReport {
    pub fn entry(&self, key: LimitKey) -> Option<&UsageEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Limits that block creating one more resource.
    pub fn exhausted(&self) -> Vec<LimitKey> {
        self.entries
            .iter()
            .filter(|entry| !entry.within_limit)
            .map(|entry| entry.key)
            .collect()
    }
}

pub fn usage_report(rights: &RightsRecord, counts: &UsageCounts) -> UsageReport {
    let entries = LimitKey::ALL
        .iter()
        .map(|key| {
            let current = counts.count(*key);
            UsageEntry {
                key: *key,
                current,
                limit: get_limit(rights, *key),
                remaining: remaining_usage(rights, current, *key),
                within_limit: is_within_limit(rights, current, *key),
            }
        })
        .collect();
    UsageReport { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entitlements::SubscriptionTier;

    fn salon_counts() -> UsageCounts {
        UsageCounts {
            barbers: 2,
            appointments_this_month: 180,
            transactions_this_month: 600,
            services_per_barber: 4,
        }
    }

    #[test]
    fn report_covers_every_limit() {
        let report = usage_report(&RightsRecord::none(), &UsageCounts::new());
        assert_eq!(report.entries.len(), LimitKey::ALL.len());
    }

    #[test]
    fn basic_salon_has_hit_barbers_and_transactions() {
        let rights = RightsRecord::for_tier(SubscriptionTier::Basic);
        let report = usage_report(&rights, &salon_counts());

        assert_eq!(
            report.exhausted(),
            vec![LimitKey::MaxBarbers, LimitKey::MaxTransactionsPerMonth]
        );

        let appointments = report.entry(LimitKey::MaxAppointmentsPerMonth).unwrap();
        assert_eq!(appointments.remaining, Limit::Finite(20));
        assert!(appointments.within_limit);

        let transactions = report.entry(LimitKey::MaxTransactionsPerMonth).unwrap();
        assert_eq!(transactions.remaining, Limit::Finite(0));
    }

    #[test]
    fn enterprise_report_is_unlimited() {
        let rights = RightsRecord::for_tier(SubscriptionTier::Enterprise);
        let report = usage_report(&rights, &salon_counts());
        assert!(report.exhausted().is_empty());
        assert!(report
            .entries
            .iter()
            .all(|entry| entry.remaining == Limit::Unlimited));
    }

    #[test]
    fn counts_deserialize_with_missing_fields() {
        let counts: UsageCounts = serde_json::from_str(r#"{"barbers": 3}"#).unwrap();
        assert_eq!(counts.count(LimitKey::MaxBarbers), 3);
        assert_eq!(counts.count(LimitKey::MaxTransactionsPerMonth), 0);
    }
}
