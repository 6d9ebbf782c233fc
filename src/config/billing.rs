//! Billing platform configuration

use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Billing status endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Subscription status endpoint; the stub tier source is used when unset
    pub status_url: Option<String>,

    /// Bearer token for the status endpoint
    pub api_key: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl BillingConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate billing configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let production = *environment == Environment::Production;

        match &self.status_url {
            None if production => {
                return Err(ValidationError::MissingRequired("BILLING__STATUS_URL"));
            }
            None => {}
            Some(url) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ValidationError::InvalidStatusUrl);
                }
                if production && !url.starts_with("https://") {
                    return Err(ValidationError::StatusUrlMustBeHttps);
                }
            }
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            status_url: None,
            api_key: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    10
}
