//! Database administration within a tenant.

use serde::Serialize;

use crate::TRACING_TARGET_API;
use crate::client::{API_PREFIX, ChromaClient};
use crate::error::Result;

#[derive(Debug, Serialize)]
struct CreateDatabaseRequest<'a> {
    name: &'a str,
}

impl ChromaClient {
    /// List databases under a tenant.
    ///
    /// Returns the raw JSON entries; the shape of a database listing varies
    /// across store versions (sometimes `{id, name, tenant}` objects,
    /// sometimes bare names), so callers apply their own field mapping.
    pub async fn list_databases(&self, tenant: &str) -> Result<Vec<serde_json::Value>> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            tenant = %tenant,
            "Listing databases"
        );

        let request = self.request(
            reqwest::Method::GET,
            &format!("{API_PREFIX}/tenants/{tenant}/databases"),
        )?;
        let response = self.send(request).await?;

        Ok(response.json().await?)
    }

    /// Create a database under a tenant.
    pub async fn create_database(&self, tenant: &str, name: &str) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            tenant = %tenant,
            database = %name,
            "Creating database"
        );

        let request = self
            .request(
                reqwest::Method::POST,
                &format!("{API_PREFIX}/tenants/{tenant}/databases"),
            )?
            .json(&CreateDatabaseRequest { name });
        self.send(request).await?;

        Ok(())
    }

    /// Delete a database and everything in it.
    pub async fn delete_database(&self, tenant: &str, name: &str) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            tenant = %tenant,
            database = %name,
            "Deleting database"
        );

        let request = self.request(
            reqwest::Method::DELETE,
            &format!("{API_PREFIX}/tenants/{tenant}/databases/{name}"),
        )?;
        self.send(request).await?;

        Ok(())
    }
}
