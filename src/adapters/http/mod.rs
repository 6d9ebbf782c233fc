//! HTTP adapters - REST API implementations.

pub mod entitlements;

use axum::Router;

pub use entitlements::entitlements_router;
pub use entitlements::EntitlementsAppState;

/// Mounts every module router under `/api` and binds the shared state.
pub fn api_router(state: EntitlementsAppState) -> Router {
    Router::new()
        .nest("/api", entitlements_router())
        .with_state(state)
}
