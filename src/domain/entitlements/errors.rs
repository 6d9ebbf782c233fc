//! Entitlement evaluation errors.
//!
//! Every variant here is an integration bug on the caller's side. None of
//! them means "access denied": denials are ordinary `false` answers.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised at the dynamic boundary of the entitlement model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntitlementError {
    #[error("Unknown feature key '{0}'")]
    UnknownFeatureKey(String),

    #[error("Unknown limit key '{0}'")]
    UnknownLimitKey(String),

    #[error("Invalid limit value {0}: only non-negative counts or the unlimited sentinel are allowed")]
    InvalidLimit(i64),

    #[error("Limit check for '{0}' requires a current count")]
    MissingCurrentCount(String),
}

impl From<EntitlementError> for DomainError {
    fn from(err: EntitlementError) -> Self {
        let code = match &err {
            EntitlementError::UnknownFeatureKey(_) | EntitlementError::UnknownLimitKey(_) => {
                ErrorCode::UnknownEntitlementKey
            }
            EntitlementError::InvalidLimit(_) | EntitlementError::MissingCurrentCount(_) => {
                ErrorCode::ValidationFailed
            }
        };
        DomainError::new(code, err.to_string())
    }
}
