//! API client for communicating with the MediaDeck REST API.

mod auth;
mod media;
mod playlist;

use serde::de::DeserializeOwned;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Network error
    #[error("Network error: {0}")]
    Network(String),
    /// HTTP error with status code
    #[error("HTTP {0} error: {1}")]
    Http(u16, String),
    /// Deserialization error
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(code, _) => Some(*code),
            _ => None,
        }
    }
}

/// Client for the MediaDeck REST API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    /// Bearer token attached to authenticated requests
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new API client on top of a preconfigured `reqwest::Client`.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client,
            auth_token: None,
        }
    }

    /// Replace the bearer token used for authenticated requests.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    /// The bearer token currently attached to requests.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Get the base URL for the API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Helper to add auth header to a request builder
    pub(super) fn with_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref token) = self.auth_token {
            builder.header("Authorization", format!("Bearer {}", token))
        } else {
            builder
        }
    }

    /// Send a request and turn transport failures and non-2xx answers into errors.
    pub(super) async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        what: &str,
    ) -> ApiResult<reqwest::Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!("Network error during {}: {}", what, e);
            ApiError::Network(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            tracing::error!("HTTP error {} during {}: {}", status, what, text);
            return Err(ApiError::Http(status, text));
        }

        Ok(response)
    }

    /// Decode a successful JSON response body.
    pub(super) async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> ApiResult<T> {
        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", what, e);
            ApiError::Decode(e.to_string())
        })
    }

    /// Drain an acknowledgement body; its content is not interpreted.
    pub(super) async fn acknowledge(response: reqwest::Response, what: &str) -> ApiResult<()> {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("{} acknowledged: {}", what, body);
        Ok(())
    }
}
