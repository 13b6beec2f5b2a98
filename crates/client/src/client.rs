//! Main SDK client implementation

use crate::config::ClientConfig;
use crate::error::{RwsError, RwsResult};
use crate::oauth::{self, AccessToken, TokenExchangeBody};
use crate::operations::{
    self, AuctionApi, AuthMode, BooksApi, Definition, HttpMethod, IchibaApi, KoboApi, ProductApi,
};
use crate::params::Params;
use crate::response::RwsResponse;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use rws_core::pacing::Pacer;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Longest budget-refill wait the client will sleep out itself. Anything
/// longer is reported as [`RwsError::RateLimited`] instead.
const MAX_PACING_WAIT: std::time::Duration = std::time::Duration::from_secs(2);

/// Rakuten Web Service client
///
/// The client wraps `reqwest` and adds:
/// - Operation dispatch by name through the registry
/// - Credential injection (`applicationId` / `access_token`, `affiliateId`)
/// - Automatic retry with exponential backoff for transient failures
/// - Request pacing against the vendor's per-application quota
/// - OAuth2 authorization-code token exchange
///
/// Cloning is cheap; clones share the HTTP pool, configuration, access
/// token and request budget.
#[derive(Clone)]
pub struct RwsClient {
    http: Client,
    config: Arc<ClientConfig>,
    token: Arc<RwLock<Option<AccessToken>>>,
    pacer: Arc<Pacer>,
}

impl RwsClient {
    /// Create a new client configured from the `RAKUTEN_*` environment.
    pub fn new() -> RwsResult<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Create a new client with specific configuration.
    pub fn with_config(config: ClientConfig) -> RwsResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("rakuten-rws/", env!("CARGO_PKG_VERSION"))),
        );

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(RwsError::Request)?;

        let token = config.access_token.clone().map(AccessToken::bare);
        let pacer = Pacer::new(config.pacing.clone());

        Ok(Self {
            http,
            config: Arc::new(config),
            token: Arc::new(RwLock::new(token)),
            pacer: Arc::new(pacer),
        })
    }

    /// Get the current configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the configured application id.
    #[must_use]
    pub fn application_id(&self) -> Option<&str> {
        self.config.application_id.as_deref()
    }

    /// Get the configured affiliate id.
    #[must_use]
    pub fn affiliate_id(&self) -> Option<&str> {
        self.config.affiliate_id.as_deref()
    }

    /// Get the current access token string, if one is set.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read_token().map(|t| t.access_token)
    }

    /// Get the full access token payload, if one is set.
    #[must_use]
    pub fn access_token_info(&self) -> Option<AccessToken> {
        self.read_token()
    }

    /// Set an access token obtained outside the SDK.
    pub fn set_access_token(&self, token: impl Into<String>) {
        self.store_token(AccessToken::bare(token));
    }

    // -------------------------------------------------------------------------
    // OAuth2
    // -------------------------------------------------------------------------

    /// Build the OAuth2 authorize URL for the given comma-separated scopes.
    pub fn authorize_url(&self, scope: &str) -> RwsResult<String> {
        let client_id = self
            .config
            .application_id
            .as_deref()
            .ok_or(RwsError::MissingCredential("applicationId"))?;
        let redirect_uri = self
            .config
            .redirect_url
            .as_deref()
            .ok_or(RwsError::MissingCredential("redirectUrl"))?;

        oauth::authorize_url(&self.config.authorize_url, client_id, redirect_uri, scope)
    }

    /// The OAuth2 token endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.config.token_url
    }

    /// Exchange an authorization code for an access token.
    ///
    /// The issued token is stored on the client, so subsequent
    /// access-token operations pick it up automatically.
    #[instrument(skip(self, code))]
    pub async fn fetch_access_token_from_code(&self, code: &str) -> RwsResult<AccessToken> {
        let client_id = self
            .config
            .application_id
            .as_deref()
            .ok_or(RwsError::MissingCredential("applicationId"))?;
        let client_secret = self
            .config
            .application_secret
            .as_deref()
            .ok_or(RwsError::MissingCredential("applicationSecret"))?;
        let redirect_uri = self
            .config
            .redirect_url
            .as_deref()
            .ok_or(RwsError::MissingCredential("redirectUrl"))?;

        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "token endpoint refused the exchange");
            return Err(RwsError::TokenExchange {
                error: format!("http_{}", status.as_u16()),
                description: Some(text),
            });
        }

        let body: TokenExchangeBody = serde_json::from_str(&text)?;
        let token = body.into_token()?;
        self.store_token(token.clone());
        debug!("access token issued");
        Ok(token)
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access Ichiba marketplace operations.
    #[must_use]
    pub fn ichiba(&self) -> IchibaApi {
        IchibaApi::new(self.clone())
    }

    /// Access Rakuten Books operations.
    #[must_use]
    pub fn books(&self) -> BooksApi {
        BooksApi::new(self.clone())
    }

    /// Access Rakuten Kobo operations.
    #[must_use]
    pub fn kobo(&self) -> KoboApi {
        KoboApi::new(self.clone())
    }

    /// Access product catalog operations.
    #[must_use]
    pub fn product(&self) -> ProductApi {
        ProductApi::new(self.clone())
    }

    /// Access Rakuten Auction operations.
    #[must_use]
    pub fn auction(&self) -> AuctionApi {
        AuctionApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Operation dispatch
    // -------------------------------------------------------------------------

    /// Execute an operation by name at its newest API version.
    #[instrument(skip(self, params))]
    pub async fn execute(&self, operation: &str, params: Params) -> RwsResult<RwsResponse> {
        self.execute_version(operation, params, None).await
    }

    /// Execute an operation by name at a specific API version.
    ///
    /// `version` takes either spelling (`2014-02-22` or `20140222`); `None`
    /// selects the operation's newest version.
    #[instrument(skip(self, params))]
    pub async fn execute_version(
        &self,
        operation: &str,
        params: Params,
        version: Option<&str>,
    ) -> RwsResult<RwsResponse> {
        let def = operations::resolve(operation)
            .ok_or_else(|| RwsError::UnknownOperation(operation.to_string()))?;

        let (date, token) = match version {
            Some(v) => def
                .versions
                .resolve(v)
                .ok_or_else(|| RwsError::unsupported_version(def.name, v))?,
            None => def.versions.latest(),
        };

        debug!(operation = def.name, version = date, "dispatching operation");
        self.dispatch(def, token, params).await
    }

    /// Build the URL, inject credentials, pace, send and wrap.
    async fn dispatch(
        &self,
        def: &'static Definition,
        version_token: &str,
        mut params: Params,
    ) -> RwsResult<RwsResponse> {
        params.strip_reserved();

        match def.auth {
            AuthMode::ApplicationId => {
                let id = self
                    .config
                    .application_id
                    .clone()
                    .ok_or(RwsError::MissingCredential("applicationId"))?;
                params = params.set("applicationId", id);
            }
            AuthMode::AccessToken => {
                let token = self
                    .access_token()
                    .ok_or(RwsError::MissingCredential("access_token"))?;
                params = params.set("access_token", token);
            }
        }

        if let Some(affiliate_id) = &self.config.affiliate_id {
            params = params.set("affiliateId", affiliate_id);
        }

        let url = format!(
            "{}/{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            def.service_path,
            def.operation_path,
            version_token
        );

        self.pace(def.service_path).await?;
        self.send_with_retry(def, &url, &params).await
    }

    /// Spend one token of the request budget, sleeping out short waits.
    async fn pace(&self, service: &str) -> RwsResult<()> {
        if self.pacer.try_acquire(service) {
            return Ok(());
        }

        let wait = self.pacer.time_until_ready(service);
        if wait > MAX_PACING_WAIT {
            warn!(
                service = service,
                wait_ms = wait.as_millis() as u64,
                "request budget exhausted"
            );
            return Err(RwsError::RateLimited);
        }

        debug!(
            service = service,
            wait_ms = wait.as_millis() as u64,
            "pacing request"
        );
        tokio::time::sleep(wait).await;

        if self.pacer.try_acquire(service) {
            Ok(())
        } else {
            Err(RwsError::RateLimited)
        }
    }

    /// Execute the request with the configured retry schedule.
    ///
    /// Transport errors retry when the error says so; responses with a
    /// transient status (5xx, 429) retry too, but a transient status on
    /// the final attempt is still returned wrapped so callers can read the
    /// vendor's error body.
    async fn send_with_retry(
        &self,
        def: &'static Definition,
        url: &str,
        params: &Params,
    ) -> RwsResult<RwsResponse> {
        let request_id = Uuid::new_v4().to_string();
        let retry = &self.config.retry;
        let mut last_error: Option<RwsError> = None;

        for attempt in 0..retry.max_attempts {
            if attempt > 0 {
                let delay = retry.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt = attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            match self.send_once(def, url, params).await {
                Ok(response) => {
                    let status = response.status();
                    if is_transient(status) && attempt + 1 < retry.max_attempts {
                        warn!(
                            request_id = %request_id,
                            status = status.as_u16(),
                            attempt = attempt + 1,
                            "transient vendor status, will retry"
                        );
                        continue;
                    }

                    debug!(
                        request_id = %request_id,
                        status = status.as_u16(),
                        attempt = attempt + 1,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "request finished"
                    );
                    return self.finish(def, response);
                }
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    warn!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "request failed, will retry"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(RwsError::RetriesExhausted {
            attempts: retry.max_attempts,
            last_error: last_error.map_or_else(|| "unknown error".to_string(), |e| e.to_string()),
        })
    }

    /// Issue a single request and wrap the raw response.
    async fn send_once(
        &self,
        def: &'static Definition,
        url: &str,
        params: &Params,
    ) -> RwsResult<RwsResponse> {
        let pairs = params.as_pairs();
        let request = match def.method {
            HttpMethod::Get => self.http.get(url).query(&pairs),
            HttpMethod::Post => self.http.post(url).form(&pairs),
        };

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        Ok(RwsResponse::new(status, url.to_string(), params.clone(), text))
    }

    /// Flatten the entity collection of successful search responses.
    fn finish(&self, def: &'static Definition, mut response: RwsResponse) -> RwsResult<RwsResponse> {
        if response.is_ok() {
            if let Some(collection) = def.collection {
                response.flatten_collection(def.name, collection.array, collection.entity)?;
            }
        }
        Ok(response)
    }

    fn read_token(&self) -> Option<AccessToken> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn store_token(&self, token: AccessToken) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token);
    }
}

/// Vendor statuses worth another attempt.
fn is_transient(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}
