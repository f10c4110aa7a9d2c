//! Clinic HTTP client
//!
//! Every request goes to one backend origin. The stored session token is read
//! right before sending and attached as a bearer header; a 401 answer ends the
//! session and forces navigation to the login page.

pub mod appointments;
pub mod error;
pub mod users;

use clinic_core::{ClientConfig, InvalidationReason, Location, Navigator, Session};
use error::{ClientError, error_message};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Clinic API client
#[derive(Clone)]
pub struct ClinicClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl ClinicClient {
    /// Create a new client builder
    pub fn builder() -> ClinicClientBuilder {
        ClinicClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Session shared with the rest of the application
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Create a request builder for a path below the base URL
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json")
    }

    /// Send a request through both interceptors and decode a JSON body
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_transport(e, self.timeout))?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send a request through both interceptors, returning the successful response
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let request = self.authorize(request);
        let response = self.dispatch(request).await?;
        self.intercept_response(response).await
    }

    /// Attach the current session token, if there is one
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.header(header::AUTHORIZATION, token.bearer()),
            None => request,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        request
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, self.timeout))
    }

    #[cfg(target_arch = "wasm32")]
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        use futures::future::{Either, select};

        // The browser fetch backend has no client-side timeout of its own
        let send = Box::pin(request.send());
        let deadline = Box::pin(gloo_timers::future::sleep(self.timeout));
        match select(send, deadline).await {
            Either::Left((result, _)) => {
                result.map_err(|e| ClientError::from_transport(e, self.timeout))
            }
            Either::Right(_) => Err(ClientError::Timeout(self.timeout)),
        }
    }

    async fn intercept_response(&self, response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        debug!(%status, url = %response.url(), "Received response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body, status);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }

        Err(ClientError::from_status(status, message))
    }

    fn handle_unauthorized(&self) {
        warn!("Backend rejected the session, signing out");
        if let Err(e) = self.session.invalidate(InvalidationReason::Unauthorized) {
            error!("Failed to clear session after 401: {e}");
        }
        self.navigator.navigate(&Location::login());
    }
}

/// Builder for ClinicClient
#[derive(Default)]
pub struct ClinicClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    session: Option<Session>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ClinicClientBuilder {
    /// Take base URL and timeout from a loaded configuration
    pub fn config(self, config: &ClientConfig) -> Self {
        self.base_url(config.api_base_url.clone())
            .timeout(config.request_timeout())
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Session the client reads tokens from and clears on 401
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Navigator used to force the login page after a 401
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ClinicClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let session = self
            .session
            .ok_or_else(|| ClientError::Configuration("session is required".into()))?;
        let navigator = self
            .navigator
            .ok_or_else(|| ClientError::Configuration("navigator is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();
        let timeout = self
            .timeout
            .unwrap_or_else(|| ClientConfig::default().request_timeout());

        #[cfg(not(target_arch = "wasm32"))]
        let client = ClientBuilder::new()
            .user_agent(concat!("clinic-client/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        #[cfg(target_arch = "wasm32")]
        let client = ClientBuilder::new().build()?;

        Ok(ClinicClient {
            client,
            base_url,
            timeout,
            session,
            navigator,
        })
    }
}
