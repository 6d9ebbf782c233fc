//! HTTP adapter for entitlement endpoints.
//!
//! Exposes the entitlements domain via REST API:
//! - `GET /api/entitlements` - Get current user's rights
//! - `GET /api/entitlements/check` - Check a feature and/or usage limit
//! - `POST /api/entitlements/usage` - Usage report against every limit

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{AuthenticatedUser, EntitlementApiError, EntitlementsAppState, USER_ID_HEADER};
pub use routes::{entitlement_routes, entitlements_router};
