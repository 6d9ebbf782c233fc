//! HTTP listener settings for the entitlements service

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Where and how the service listens. Missing keys take their default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address; must be an IP literal
    pub host: String,
    pub port: u16,
    /// Production switches logs to JSON and requires an https billing URL
    pub environment: Environment,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Per-request budget, 1..=300 seconds
    pub request_timeout_secs: u64,
}

/// Deployment environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::default(),
            log_level: "info,salon_entitlements=debug".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidSocketAddr(addr))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=300).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: ServerConfig =
            serde_json::from_value(serde_json::json!({ "port": 3000, "environment": "production" }))
                .unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn hostname_is_not_a_bind_address() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSocketAddr(_))
        ));
    }

    #[test]
    fn rejects_port_zero_and_out_of_range_timeouts() {
        let port_zero = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(port_zero.validate(), Err(ValidationError::InvalidPort)));

        for secs in [0, 301] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ValidationError::InvalidTimeout)),
                "{} should be rejected",
                secs
            );
        }
    }
}
