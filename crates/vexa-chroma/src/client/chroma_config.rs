//! Store client configuration
//!
//! This module provides configuration structures and builders for the store client.

use std::time::Duration;

use derive_builder::Builder;
use url::Url;

use crate::error::{Error, Result};

/// Configuration for the store client
///
/// Contains all the settings needed to configure the client behavior,
/// including timeouts and API endpoints.
#[derive(Debug, Clone, Builder)]
#[builder(
    name = "ChromaBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct ChromaConfig {
    /// Base URL for the store API
    #[builder(setter(custom), default = "ChromaConfig::default_base_url()")]
    pub base_url: Url,
    /// Request timeout duration
    #[builder(default = "Duration::from_secs(30)")]
    pub timeout: Duration,
    /// Connection timeout duration
    #[builder(default = "Duration::from_secs(10)")]
    pub connect_timeout: Duration,
    /// User agent string for requests
    #[builder(default = "ChromaConfig::default_user_agent()")]
    pub user_agent: String,
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl ChromaConfig {
    /// Create a new configuration builder
    pub fn builder() -> ChromaBuilder {
        ChromaBuilder::default()
    }

    fn default_base_url() -> Url {
        "http://localhost:8000".parse().expect("Valid default URL")
    }

    fn default_user_agent() -> String {
        format!("vexa-chroma/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl ChromaBuilder {
    /// Set the base URL for the store API
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.base_url =
            Some(url.parse().map_err(|e| {
                Error::invalid_config(format!("Invalid base URL '{}': {}", url, e))
            })?);
        Ok(self)
    }

    fn validate_config(&self) -> std::result::Result<(), String> {
        if let Some(timeout) = &self.timeout {
            if timeout.as_secs() == 0 {
                return Err("Timeout must be greater than 0".to_string());
            }
        }

        if let Some(connect_timeout) = &self.connect_timeout {
            if connect_timeout.as_secs() == 0 {
                return Err("Connect timeout must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}
