//! Application layer - Queries and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Entitlements are read-only here: every handler is a query.

pub mod handlers;

pub use handlers::{
    CheckEntitlementHandler, CheckEntitlementQuery, CheckEntitlementResult, GetRightsHandler,
    GetRightsQuery, GetRightsResult, GetUsageReportHandler, GetUsageReportQuery,
    GetUsageReportResult,
};
