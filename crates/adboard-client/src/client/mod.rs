//! Authenticated HTTP client for the dashboard backend.
//!
//! Wraps `reqwest` with bearer-credential injection, centralized session
//! expiry on 401, and typed response decoding. Endpoint bindings live in
//! [`crate::api`] as further `impl ApiClient` blocks.

use std::sync::Arc;
use std::time::Duration;

use adboard_core::AppConfig;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::session::{Navigator, SessionExpiry};
use crate::storage::{CredentialStore, ACCESS_TOKEN_KEY};

/// Client for the dashboard backend.
///
/// Cheap to clone; clones share the HTTP connection pool, the credential
/// store, and the session-expiry state.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    store: Arc<dyn CredentialStore>,
    expiry: Arc<SessionExpiry>,
}

impl ApiClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// The base URL may carry a path prefix (`https://host/api`); endpoint
    /// paths are appended below it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse or cannot carry a path.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        store: Arc<dyn CredentialStore>,
        expiry: Arc<SessionExpiry>,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: trimmed.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url,
            store,
            expiry,
        })
    }

    /// Builds a client and its session-expiry state from application config.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn from_config(
        config: &AppConfig,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let expiry = Arc::new(SessionExpiry::new(
            navigator,
            config.sign_in_path.clone(),
            Duration::from_millis(config.expiry_redirect_delay_ms),
        ));
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            store,
            expiry,
        )
    }

    #[must_use]
    pub fn expiry(&self) -> &SessionExpiry {
        &self.expiry
    }

    #[must_use]
    pub fn store(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.store)
    }

    /// `GET` an endpoint and decode its JSON body.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] on 401 (session expiry already handled).
    /// - [`ClientError::Api`] on any other non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Decode`] if the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = self.endpoint(segments, query);
        let request = self.client.get(url.clone());
        self.send(request, &url).await
    }

    /// `POST` a JSON body to an endpoint and decode its JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_json`].
    pub async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments, &[]);
        let request = self.client.post(url.clone()).json(body);
        self.send(request, &url).await
    }

    /// `POST` with no body. An empty response body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_json`].
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, ClientError> {
        let url = self.endpoint(segments, &[]);
        let request = self.client.post(url.clone());
        self.send(request, &url).await
    }

    /// Appends percent-encoded path segments and query pairs to the base URL.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Attaches the current credential, sends, and maps the response.
    ///
    /// The credential is read from the store on every call rather than kept
    /// on the client, so a rotated token takes effect immediately.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, ClientError> {
        let request = match self.store.get(ACCESS_TOKEN_KEY)? {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        };

        tracing::debug!(url = %url, "backend request");
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.expiry.observe_unauthorized(self.store.as_ref());
            return Err(ClientError::Unauthorized);
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "backend error response");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        let body = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(body).map_err(|e| ClientError::Decode {
            context: url.path().to_string(),
            source: e,
        })
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Recognizes `{"detail": "..."}`, `{"message": "..."}`, `{"error": "..."}`
/// and `{"error": {"message": "..."}}`. Non-JSON bodies yield `None`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let text = ["detail", "message", "error"]
        .iter()
        .find_map(|key| match value.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(obj) => obj
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned),
            _ => None,
        })?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
