//! Error types for the SDK

use thiserror::Error;

/// Result type alias for SDK operations
pub type RwsResult<T> = Result<T, RwsError>;

/// SDK errors
#[derive(Error, Debug)]
pub enum RwsError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The operation name is not in the registry
    #[error("Operation is not defined: {0}")]
    UnknownOperation(String),

    /// The operation does not publish the requested API version
    #[error("{operation} does not support API version {version}")]
    UnsupportedVersion {
        /// Operation name
        operation: String,
        /// Requested version
        version: String,
    },

    /// The credential the operation's auth mode needs is not configured
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// The authorization server rejected the code exchange
    #[error("Token exchange failed: {error}{}", .description.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    TokenExchange {
        /// OAuth2 error code (e.g. `invalid_request`)
        error: String,
        /// Human-readable detail from the authorization server
        description: Option<String>,
    },

    /// The response body did not have the shape the operation promises
    #[error("Malformed {operation} response: {detail}")]
    MalformedResponse {
        /// Operation name
        operation: String,
        /// What was missing or mis-shaped
        detail: String,
    },

    /// Client-side request budget exhausted
    #[error("Request budget exhausted - too many requests")]
    RateLimited,

    /// All retry attempts exhausted
    #[error("All {attempts} attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },
}

impl RwsError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an unsupported-version error
    pub fn unsupported_version(operation: impl Into<String>, version: impl Into<String>) -> Self {
        Self::UnsupportedVersion {
            operation: operation.into(),
            version: version.into(),
        }
    }

    /// Create a malformed-response error
    pub fn malformed(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation: operation.into(),
            detail: detail.into(),
        }
    }

    /// Check if this error is worth retrying
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::Json(_)
            | Self::Config(_)
            | Self::UnknownOperation(_)
            | Self::UnsupportedVersion { .. }
            | Self::MissingCredential(_)
            | Self::TokenExchange { .. }
            | Self::MalformedResponse { .. }
            | Self::RateLimited
            | Self::RetriesExhausted { .. } => false,
        }
    }

    /// Check if the failure originated on this side: bad configuration,
    /// bad input, missing credentials, a refused code exchange, or an
    /// exhausted client-side request budget.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::UnknownOperation(_)
                | Self::UnsupportedVersion { .. }
                | Self::MissingCredential(_)
                | Self::TokenExchange { .. }
                | Self::RateLimited
        )
    }

    /// Check if the vendor side failed: transport errors, bodies that do
    /// not decode, responses with the wrong shape, or exhausted retries.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Request(_)
                | Self::Json(_)
                | Self::MalformedResponse { .. }
                | Self::RetriesExhausted { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_exchange_display_includes_description() {
        let e = RwsError::TokenExchange {
            error: "invalid_request".to_string(),
            description: Some("invalid code".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "Token exchange failed: invalid_request (invalid code)"
        );

        let bare = RwsError::TokenExchange {
            error: "invalid_client".to_string(),
            description: None,
        };
        assert_eq!(bare.to_string(), "Token exchange failed: invalid_client");
    }

    #[test]
    fn config_errors_are_not_retryable() {
        assert!(!RwsError::config("base_url cannot be empty").is_retryable());
        assert!(!RwsError::UnknownOperation("Nope".to_string()).is_retryable());
        assert!(!RwsError::RateLimited.is_retryable());
    }

    #[test]
    fn client_and_server_sides_partition_the_errors() {
        assert!(RwsError::UnknownOperation("Nope".to_string()).is_client_error());
        assert!(RwsError::MissingCredential("applicationId").is_client_error());
        assert!(RwsError::RateLimited.is_client_error());
        assert!(!RwsError::RateLimited.is_server_error());

        let exchange = RwsError::TokenExchange {
            error: "invalid_request".to_string(),
            description: None,
        };
        assert!(exchange.is_client_error());

        let exhausted = RwsError::RetriesExhausted {
            attempts: 3,
            last_error: "connection refused".to_string(),
        };
        assert!(exhausted.is_server_error());
        assert!(!exhausted.is_client_error());

        let malformed = RwsError::malformed("IchibaItemSearch", "missing Items array");
        assert!(malformed.is_server_error());
        assert!(!malformed.is_client_error());
    }
}
