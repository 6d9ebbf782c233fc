//! Entitlement handlers.
//!
//! Query handlers resolving a user's rights from their billing status:
//!
//! ## Queries
//! - Get the full rights record
//! - Check a feature and/or usage limit
//! - Report usage against every limit

mod check_entitlement;
mod get_rights;
mod get_usage_report;

pub use check_entitlement::{
    CheckEntitlementHandler, CheckEntitlementQuery, CheckEntitlementResult,
};
pub use get_rights::{GetRightsHandler, GetRightsQuery, GetRightsResult};
pub use get_usage_report::{GetUsageReportHandler, GetUsageReportQuery, GetUsageReportResult};
