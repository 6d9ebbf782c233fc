//! Application handlers.
//!
//! Query handlers that orchestrate domain operations.

pub mod entitlements;

pub use entitlements::{
    CheckEntitlementHandler, CheckEntitlementQuery, CheckEntitlementResult, GetRightsHandler,
    GetRightsQuery, GetRightsResult, GetUsageReportHandler, GetUsageReportQuery,
    GetUsageReportResult,
};
