//! GetUsageReportHandler - Query handler comparing usage counts to limits.

use std::sync::Arc;

use crate::domain::entitlements::{usage_report, SubscriptionTier, UsageCounts, UsageReport};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::TierSource;

use super::get_rights::load_snapshot;

/// Query for a usage report. Counts are supplied by the caller.
#[derive(Debug, Clone)]
pub struct GetUsageReportQuery {
    pub user_id: UserId,
    pub counts: UsageCounts,
}

#[derive(Debug, Clone)]
pub struct GetUsageReportResult {
    pub tier: SubscriptionTier,
    pub report: UsageReport,
}

pub struct GetUsageReportHandler {
    tier_source: Arc<dyn TierSource>,
}

impl GetUsageReportHandler {
    pub fn new(tier_source: Arc<dyn TierSource>) -> Self {
        Self { tier_source }
    }

    pub async fn handle(
        &self,
        query: GetUsageReportQuery,
    ) -> Result<GetUsageReportResult, DomainError> {
        let snapshot = load_snapshot(self.tier_source.as_ref(), &query.user_id).await?;
        let rights = snapshot.rights();

        Ok(GetUsageReportResult {
            tier: rights.tier,
            report: usage_report(&rights, &query.counts),
        })
    }
}
