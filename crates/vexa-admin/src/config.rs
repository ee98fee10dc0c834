//! Connection configuration for the facade.

use derive_builder::Builder;

/// Tenant used when neither the caller nor the configuration names one.
pub const DEFAULT_TENANT: &str = "default_tenant";

/// Database used when neither the caller nor the configuration names one.
pub const DEFAULT_DATABASE: &str = "default_database";

/// Connection coordinates and credential for one store.
///
/// Immutable per connection attempt; [`crate::VectorStoreFacade::connect`]
/// replaces it wholesale on reconnect. Not persisted by this crate.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(pattern = "owned", setter(into, strip_option, prefix = "with"))]
pub struct ConnectionConfig {
    /// Store host name or address.
    #[builder(default = "ConnectionConfig::default_host()")]
    pub host: String,
    /// Store port.
    #[builder(default = "8000")]
    pub port: u16,
    /// Whether to connect over TLS.
    #[builder(default = "false")]
    pub use_tls: bool,
    /// Default tenant scope for operations that do not name one.
    #[builder(default)]
    pub tenant: Option<String>,
    /// Default database scope for operations that do not name one.
    #[builder(default)]
    pub database: Option<String>,
    /// Bearer-style API token, passed through to the store as-is.
    #[builder(default)]
    pub api_key: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: 8000,
            use_tls: false,
            tenant: None,
            database: None,
            api_key: None,
        }
    }
}

impl ConnectionConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::default()
    }

    fn default_host() -> String {
        "localhost".to_string()
    }

    /// Base URL assembled from host, port, and the TLS flag.
    pub fn base_url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    /// Configured tenant, or the store default.
    pub fn tenant_or_default(&self) -> &str {
        self.tenant.as_deref().unwrap_or(DEFAULT_TENANT)
    }

    /// Configured database, or the store default.
    pub fn database_or_default(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConnectionConfig::default();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8000);
        assert!(!config.use_tls);
        assert_eq!(config.base_url(), "http://localhost:8000");
        assert_eq!(config.tenant_or_default(), DEFAULT_TENANT);
        assert_eq!(config.database_or_default(), DEFAULT_DATABASE);
    }

    #[test]
    fn test_config_builder() {
        let config = ConnectionConfig::builder()
            .with_host("chroma.internal")
            .with_port(9000u16)
            .with_use_tls(true)
            .with_tenant("acme")
            .with_api_key("secret")
            .build()
            .expect("Valid config");

        assert_eq!(config.base_url(), "https://chroma.internal:9000");
        assert_eq!(config.tenant_or_default(), "acme");
        assert_eq!(config.database_or_default(), DEFAULT_DATABASE);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }
}
