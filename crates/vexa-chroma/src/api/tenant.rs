//! Tenant administration and identity lookup.

use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_API;
use crate::client::{API_PREFIX, ChromaClient};
use crate::error::Result;

/// The caller's identity as reported by the store.
///
/// Fields are best-effort: deployments without an auth provider may omit any
/// of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Identity {
    /// User identifier, when an auth provider is configured.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Tenant the credential is scoped to.
    #[serde(default)]
    pub tenant: Option<String>,
    /// Databases the credential can see.
    #[serde(default)]
    pub databases: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CreateTenantRequest<'a> {
    name: &'a str,
}

impl ChromaClient {
    /// Resolve the caller's identity (user, tenant, visible databases).
    pub async fn get_identity(&self) -> Result<Identity> {
        tracing::debug!(target: TRACING_TARGET_API, "Resolving identity");

        let request = self.request(reqwest::Method::GET, &format!("{API_PREFIX}/auth/identity"))?;
        let response = self.send(request).await?;

        Ok(response.json().await?)
    }

    /// Create a tenant.
    pub async fn create_tenant(&self, name: &str) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            tenant = %name,
            "Creating tenant"
        );

        let request = self
            .request(reqwest::Method::POST, &format!("{API_PREFIX}/tenants"))?
            .json(&CreateTenantRequest { name });
        self.send(request).await?;

        Ok(())
    }
}
