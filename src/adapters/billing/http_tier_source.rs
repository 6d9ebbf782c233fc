//! HTTP billing status adapter.
//!
//! Implements `TierSource` against the billing platform's subscription status
//! endpoint: `GET {status_url}?userId=<id>`, answering
//! `{ "subscribed": bool, "tier": string | null }`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpTierSourceConfig::new("https://billing.example.com/subscription-status")
//!     .with_api_key("sk_billing_...");
//! let source = HttpTierSource::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::entitlements::SubscriptionStatus;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::TierSource;

/// Billing status endpoint configuration.
#[derive(Clone)]
pub struct HttpTierSourceConfig {
    /// Full URL of the status endpoint.
    status_url: String,

    /// Bearer token for the endpoint, if it requires one.
    api_key: Option<SecretString>,

    /// Per-request timeout.
    timeout: Duration,
}

impl HttpTierSourceConfig {
    pub fn new(status_url: impl Into<String>) -> Self {
        Self {
            status_url: status_url.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    pub fn with_secret_api_key(mut self, api_key: Option<SecretString>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Tier source backed by the billing platform's HTTP status check.
pub struct HttpTierSource {
    config: HttpTierSourceConfig,
    http_client: reqwest::Client,
}

impl HttpTierSource {
    pub fn new(config: HttpTierSourceConfig) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to build billing HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl TierSource for HttpTierSource {
    async fn fetch_status(&self, user_id: &UserId) -> Result<SubscriptionStatus, DomainError> {
        tracing::debug!(user_id = %user_id, "Checking subscription status");

        let mut request = self
            .http_client
            .get(&self.config.status_url)
            .query(&[("userId", user_id.as_str())]);

        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(user_id = %user_id, error = %e, "Billing status request failed");
            DomainError::billing_unavailable(format!("Billing status request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            // The body stays in the logs; it can carry upstream internals.
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                user_id = %user_id,
                status = %status,
                body = %body,
                "Billing status endpoint returned an error"
            );
            return Err(DomainError::billing_unavailable(format!(
                "Billing status endpoint returned {}",
                status
            )));
        }

        response.json::<SubscriptionStatus>().await.map_err(|e| {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to parse billing status");
            DomainError::billing_unavailable(format!("Failed to parse billing status: {}", e))
        })
    }
}
