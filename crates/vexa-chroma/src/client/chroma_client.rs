//! Store client implementation
//!
//! This module provides the main client interface for Chroma-style store
//! operations. It handles authentication, request/response processing, and
//! connection management.

use reqwest::{Client as HttpClient, ClientBuilder};

use super::{ChromaConfig, ChromaCredentials};
use crate::TRACING_TARGET_CLIENT;
use crate::error::{Error, Result};

/// Version prefix shared by every API route.
pub(crate) const API_PREFIX: &str = "/api/v2";

/// Store client for interacting with a Chroma-style vector store API.
///
/// The client handles authentication and connection pooling; individual
/// endpoint operations are implemented in [`crate::api`].
///
/// # Examples
///
/// ```rust,ignore
/// use vexa_chroma::{ChromaClient, ChromaConfig, ChromaCredentials};
/// use std::time::Duration;
///
/// let config = ChromaConfig::builder()
///     .with_base_url("http://localhost:8000")?
///     .with_timeout(Duration::from_secs(30))
///     .build()?;
///
/// let credentials = ChromaCredentials::bearer_token("your-token");
/// let client = ChromaClient::new(config, credentials)?;
/// ```
#[derive(Debug, Clone)]
pub struct ChromaClient {
    http_client: HttpClient,
    config: ChromaConfig,
    credentials: ChromaCredentials,
}

impl ChromaClient {
    /// Create a new store client with the given configuration and credentials.
    ///
    /// Construction does not touch the network; call [`Self::heartbeat`] to
    /// verify the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or if the
    /// configuration is invalid.
    pub fn new(config: ChromaConfig, credentials: ChromaCredentials) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = %config.base_url,
            "Creating store client"
        );

        let http_client = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            http_client,
            config,
            credentials,
        })
    }

    /// Create a new store client with default configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for the store API
    /// * `credentials` - Authentication credentials
    pub fn with_defaults(
        base_url: impl AsRef<str>,
        credentials: ChromaCredentials,
    ) -> Result<Self> {
        let config = ChromaConfig::builder()
            .with_base_url(base_url.as_ref())?
            .build()
            .map_err(|e| Error::invalid_config(e.to_string()))?;

        Self::new(config, credentials)
    }

    /// Perform a liveness check against the store.
    ///
    /// This method verifies that the store is accessible and responding.
    pub async fn heartbeat(&self) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            "Performing heartbeat check"
        );

        let request = self.request(reqwest::Method::GET, &format!("{API_PREFIX}/heartbeat"))?;
        let response = request.send().await.map_err(Error::Http)?;

        if response.status().is_success() {
            tracing::debug!(
                target: TRACING_TARGET_CLIENT,
                status = response.status().as_u16(),
                "Heartbeat successful"
            );
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(
                target: TRACING_TARGET_CLIENT,
                status,
                message,
                "Heartbeat failed"
            );

            Err(Error::api_error(status, message))
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ChromaConfig {
        &self.config
    }

    /// Get the credentials type (for debugging/logging purposes only).
    pub fn credentials_type(&self) -> &'static str {
        match &self.credentials {
            ChromaCredentials::BearerToken(_) => "bearer_token",
            ChromaCredentials::TokenHeader(_) => "token_header",
            ChromaCredentials::None => "none",
        }
    }

    /// Add authentication headers to a request.
    fn add_auth_headers(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            ChromaCredentials::BearerToken(token) => {
                request = request.header("Authorization", format!("Bearer {}", token));
            }
            ChromaCredentials::TokenHeader(token) => {
                request = request.header("X-Chroma-Token", token);
            }
            ChromaCredentials::None => {
                // No authentication headers needed for local deployments
            }
        }
        request
    }

    /// Create a new request builder with base configuration.
    pub(crate) fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder> {
        let url = self
            .config
            .base_url
            .join(path)
            .map_err(|e| Error::invalid_config(format!("Invalid request URL: {}", e)))?;

        let request = self.http_client.request(method, url);
        let request = self.add_auth_headers(request);

        Ok(request)
    }

    /// Send a request, mapping non-success responses to [`Error::ApiError`].
    pub(crate) async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await.map_err(Error::Http)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            Err(Error::api_error(status, message))
        }
    }
}
