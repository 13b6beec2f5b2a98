//! Configuration for the SDK client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{RwsError, RwsResult};
use crate::oauth::{DEFAULT_AUTHORIZE_URL, DEFAULT_TOKEN_URL};
use rws_core::pacing::PacingConfig;
use rws_core::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://app.rakuten.co.jp/services/api";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL the service/operation/version path is appended to.
    pub base_url: String,
    /// OAuth2 authorization endpoint.
    pub authorize_url: String,
    /// OAuth2 token endpoint.
    pub token_url: String,
    /// Application id, the vendor's API key.
    pub application_id: Option<String>,
    /// Application secret, needed for the token exchange.
    pub application_secret: Option<String>,
    /// Affiliate id, appended to every request when set.
    pub affiliate_id: Option<String>,
    /// Redirect URL registered for the OAuth2 flow.
    pub redirect_url: Option<String>,
    /// Access token obtained outside the SDK, if any.
    pub access_token: Option<String>,
    /// Request timeout.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Retry policy for transient failures.
    pub retry: RetryConfig,
    /// Client-side request budget.
    pub pacing: PacingConfig,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            application_id: None,
            application_secret: None,
            affiliate_id: None,
            redirect_url: None,
            access_token: None,
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
            pacing: PacingConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `RAKUTEN_APPLICATION_ID`: application id (API key)
    /// - `RAKUTEN_APPLICATION_SECRET`: application secret
    /// - `RAKUTEN_AFFILIATE_ID`: affiliate id
    /// - `RAKUTEN_REDIRECT_URL`: OAuth2 redirect URL
    /// - `RAKUTEN_ACCESS_TOKEN`: previously issued access token
    /// - `RAKUTEN_API_URL`: API base URL override
    /// - `RAKUTEN_TIMEOUT_SECS`: request timeout in seconds
    #[must_use]
    pub fn from_env() -> Self {
        let timeout = env::var("RAKUTEN_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Self {
            base_url: env::var("RAKUTEN_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            application_id: env::var("RAKUTEN_APPLICATION_ID").ok(),
            application_secret: env::var("RAKUTEN_APPLICATION_SECRET").ok(),
            affiliate_id: env::var("RAKUTEN_AFFILIATE_ID").ok(),
            redirect_url: env::var("RAKUTEN_REDIRECT_URL").ok(),
            access_token: env::var("RAKUTEN_ACCESS_TOKEN").ok(),
            timeout,
            ..Self::default()
        }
    }

    /// Builder-style method to set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the authorize URL.
    #[must_use]
    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    /// Builder-style method to set the token URL.
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Builder-style method to set the application id.
    #[must_use]
    pub fn with_application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    /// Builder-style method to set the application secret.
    #[must_use]
    pub fn with_application_secret(mut self, secret: impl Into<String>) -> Self {
        self.application_secret = Some(secret.into());
        self
    }

    /// Builder-style method to set the affiliate id.
    #[must_use]
    pub fn with_affiliate_id(mut self, id: impl Into<String>) -> Self {
        self.affiliate_id = Some(id.into());
        self
    }

    /// Builder-style method to set the redirect URL.
    #[must_use]
    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    /// Builder-style method to seed an access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Builder-style method to set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Builder-style method to set the request budget.
    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> RwsResult<()> {
        for (name, url) in [
            ("base_url", &self.base_url),
            ("authorize_url", &self.authorize_url),
            ("token_url", &self.token_url),
        ] {
            if url.is_empty() {
                return Err(RwsError::config(format!("{name} cannot be empty")));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(RwsError::config(format!(
                    "{name} must start with http:// or https://"
                )));
            }
        }

        if self.timeout.is_zero() {
            return Err(RwsError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_vendor() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://app.rakuten.co.jp/services/api");
        assert!(config.token_url.ends_with("/services/token"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:8080/services/api")
            .with_application_id("123")
            .with_affiliate_id("456")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://localhost:8080/services/api");
        assert_eq!(config.application_id.as_deref(), Some("123"));
        assert_eq!(config.affiliate_id.as_deref(), Some("456"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn validation_rejects_bad_urls() {
        let empty = ClientConfig::default().with_base_url("");
        assert!(empty.validate().is_err());

        let scheme = ClientConfig::default().with_token_url("ftp://example.com/token");
        assert!(scheme.validate().is_err());

        let timeout = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(timeout.validate().is_err());
    }
}
