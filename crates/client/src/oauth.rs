//! OAuth2 helpers
//!
//! The SDK covers the server side of the authorization-code flow only: it
//! builds the authorize URL the caller must send the user to, and exchanges
//! the returned code for an access token. Driving the browser redirect is
//! the caller's responsibility.

use crate::error::{RwsError, RwsResult};
use serde::{Deserialize, Serialize};

/// Default authorization endpoint.
pub const DEFAULT_AUTHORIZE_URL: &str = "https://app.rakuten.co.jp/services/authorize";

/// Default token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://app.rakuten.co.jp/services/token";

/// An issued OAuth2 access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The bearer token sent as the `access_token` request parameter.
    pub access_token: String,
    /// Refresh token, when the server issued one.
    pub refresh_token: Option<String>,
    /// Token type, typically `BEARER`.
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    pub expires_in: Option<u64>,
    /// Granted scopes, comma separated.
    pub scope: Option<String>,
}

impl AccessToken {
    /// Wrap a bare token string obtained outside the SDK.
    #[must_use]
    pub fn bare(token: impl Into<String>) -> Self {
        Self {
            access_token: token.into(),
            refresh_token: None,
            token_type: None,
            expires_in: None,
            scope: None,
        }
    }
}

/// Token endpoint payload: either an issued token or an OAuth2 error.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenExchangeBody {
    access_token: Option<String>,
    refresh_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<u64>,
    scope: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl TokenExchangeBody {
    /// Split the payload into a token or the server's stated reason.
    pub(crate) fn into_token(self) -> RwsResult<AccessToken> {
        if let Some(access_token) = self.access_token {
            return Ok(AccessToken {
                access_token,
                refresh_token: self.refresh_token,
                token_type: self.token_type,
                expires_in: self.expires_in,
                scope: self.scope,
            });
        }

        Err(RwsError::TokenExchange {
            error: self.error.unwrap_or_else(|| "invalid_response".to_string()),
            description: self.error_description,
        })
    }
}

/// Build the authorize URL for the given client id, redirect URI and scopes.
///
/// `scope` takes comma-separated scope names, as the vendor expects.
pub fn authorize_url(
    base: &str,
    client_id: &str,
    redirect_uri: &str,
    scope: &str,
) -> RwsResult<String> {
    let url = reqwest::Url::parse_with_params(
        base,
        &[
            ("response_type", "code"),
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("scope", scope),
        ],
    )
    .map_err(|e| RwsError::config(format!("invalid authorize URL {base}: {e}")))?;

    Ok(url.into())
}
