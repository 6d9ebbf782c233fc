//! Axum router configuration for entitlement endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{check_entitlement, get_rights, usage_report, EntitlementsAppState};

/// Create the entitlement API router.
///
/// # Routes
///
/// All endpoints identify the caller by the `X-User-Id` header.
/// - `GET /` - Get current user's rights
/// - `GET /check` - Check a feature and/or usage limit
/// - `POST /usage` - Compare usage counts to the user's limits
pub fn entitlement_routes() -> Router<EntitlementsAppState> {
    Router::new()
        .route("/", get(get_rights))
        .route("/check", get(check_entitlement))
        .route("/usage", post(usage_report))
}

/// Create the complete entitlements module router, suitable for mounting
/// under `/api`.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .nest("/api", entitlements_router())
///     .with_state(EntitlementsAppState::new(tier_source));
/// ```
pub fn entitlements_router() -> Router<EntitlementsAppState> {
    Router::new().nest("/entitlements", entitlement_routes())
}
