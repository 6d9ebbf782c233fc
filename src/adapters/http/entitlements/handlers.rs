//! HTTP handlers for entitlement endpoints.
//!
//! These handlers connect Axum routes to application layer query handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::entitlements::{
    CheckEntitlementHandler, CheckEntitlementQuery, GetRightsHandler, GetRightsQuery,
    GetUsageReportHandler, GetUsageReportQuery,
};
use crate::domain::entitlements::UsageCounts;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::TierSource;

use super::dto::{
    CheckEntitlementParams, CheckEntitlementResponse, ErrorResponse, RightsResponse,
    UsageReportResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct EntitlementsAppState {
    pub tier_source: Arc<dyn TierSource>,
}

impl EntitlementsAppState {
    pub fn new(tier_source: Arc<dyn TierSource>) -> Self {
        Self { tier_source }
    }

    pub fn get_rights_handler(&self) -> GetRightsHandler {
        GetRightsHandler::new(self.tier_source.clone())
    }

    pub fn check_entitlement_handler(&self) -> CheckEntitlementHandler {
        CheckEntitlementHandler::new(self.tier_source.clone())
    }

    pub fn usage_report_handler(&self) -> GetUsageReportHandler {
        GetUsageReportHandler::new(self.tier_source.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context
// ════════════════════════════════════════════════════════════════════════════════

/// Header carrying the user id resolved by the upstream auth provider.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Authenticated user context extracted from request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = EntitlementApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| UserId::new(s).ok())
            .ok_or_else(|| {
                EntitlementApiError(DomainError::new(
                    ErrorCode::Unauthorized,
                    "Authentication is required",
                ))
            })?;

        Ok(AuthenticatedUser { user_id })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/entitlements - Get current user's rights
pub async fn get_rights(
    State(state): State<EntitlementsAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, EntitlementApiError> {
    let handler = state.get_rights_handler();
    let query = GetRightsQuery {
        user_id: user.user_id,
    };

    let result = handler.handle(query).await?;

    Ok(Json(RightsResponse::from(result)))
}

/// GET /api/entitlements/check - Check a feature and/or usage limit
pub async fn check_entitlement(
    State(state): State<EntitlementsAppState>,
    user: AuthenticatedUser,
    params: Result<Query<CheckEntitlementParams>, QueryRejection>,
) -> Result<impl IntoResponse, EntitlementApiError> {
    let Query(params) = params?;
    let handler = state.check_entitlement_handler();
    let query = CheckEntitlementQuery {
        user_id: user.user_id,
        feature: params.feature,
        limit: params.limit,
        current: params.current,
    };

    let result = handler.handle(query).await?;

    Ok(Json(CheckEntitlementResponse::from(result)))
}

/// POST /api/entitlements/usage - Compare usage counts to the user's limits
pub async fn usage_report(
    State(state): State<EntitlementsAppState>,
    user: AuthenticatedUser,
    counts: Result<Json<UsageCounts>, JsonRejection>,
) -> Result<impl IntoResponse, EntitlementApiError> {
    let Json(counts) = counts?;
    let handler = state.usage_report_handler();
    let query = GetUsageReportQuery {
        user_id: user.user_id,
        counts,
    };

    let result = handler.handle(query).await?;

    Ok(Json(UsageReportResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct EntitlementApiError(pub DomainError);

impl From<DomainError> for EntitlementApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<QueryRejection> for EntitlementApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(DomainError::new(ErrorCode::ValidationFailed, rejection.body_text()))
    }
}

impl From<JsonRejection> for EntitlementApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DomainError::new(ErrorCode::ValidationFailed, rejection.body_text()))
    }
}

impl EntitlementApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.code {
            ErrorCode::ValidationFailed | ErrorCode::UnknownEntitlementKey => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::BillingUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EntitlementApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let mut body = ErrorResponse::new(self.0.code.to_string(), self.0.message.clone());

        // Server-side details stay in the logs.
        if status.is_server_error() {
            tracing::error!(
                error = %self.0,
                details = ?self.0.details,
                "Entitlement request failed"
            );
        } else {
            body = body.with_details(self.0.details);
        }

        (status, Json(body)).into_response()
    }
}
