//! Collection CRUD within a tenant/database scope.

use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_API;
use crate::client::{API_PREFIX, ChromaClient};
use crate::error::Result;

/// A collection as returned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    /// Store-assigned collection id.
    pub id: String,
    /// Human-facing collection name.
    pub name: String,
    /// Record count, when the store includes one in the listing.
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Serialize)]
struct CreateCollectionRequest<'a> {
    name: &'a str,
    get_or_create: bool,
}

#[derive(Debug, Serialize)]
struct UpdateCollectionRequest<'a> {
    new_name: &'a str,
}

impl ChromaClient {
    fn collections_path(tenant: &str, database: &str) -> String {
        format!("{API_PREFIX}/tenants/{tenant}/databases/{database}/collections")
    }

    /// List collections in a database.
    pub async fn list_collections(&self, tenant: &str, database: &str) -> Result<Vec<Collection>> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            tenant = %tenant,
            database = %database,
            "Listing collections"
        );

        let request = self.request(
            reqwest::Method::GET,
            &Self::collections_path(tenant, database),
        )?;
        let response = self.send(request).await?;

        Ok(response.json().await?)
    }

    /// Create a collection, or fetch it if it already exists.
    pub async fn create_collection(
        &self,
        tenant: &str,
        database: &str,
        name: &str,
        get_or_create: bool,
    ) -> Result<Collection> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            tenant = %tenant,
            database = %database,
            collection = %name,
            get_or_create,
            "Creating collection"
        );

        let request = self
            .request(
                reqwest::Method::POST,
                &Self::collections_path(tenant, database),
            )?
            .json(&CreateCollectionRequest {
                name,
                get_or_create,
            });
        let response = self.send(request).await?;

        Ok(response.json().await?)
    }

    /// Delete a collection by name.
    pub async fn delete_collection(&self, tenant: &str, database: &str, name: &str) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            tenant = %tenant,
            database = %database,
            collection = %name,
            "Deleting collection"
        );

        let path = format!("{}/{}", Self::collections_path(tenant, database), name);
        let request = self.request(reqwest::Method::DELETE, &path)?;
        self.send(request).await?;

        Ok(())
    }

    /// Rename a collection by id.
    pub async fn update_collection(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        new_name: &str,
    ) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            tenant = %tenant,
            database = %database,
            collection = %collection_id,
            new_name = %new_name,
            "Renaming collection"
        );

        let path = format!(
            "{}/{}",
            Self::collections_path(tenant, database),
            collection_id
        );
        let request = self
            .request(reqwest::Method::PUT, &path)?
            .json(&UpdateCollectionRequest { new_name });
        self.send(request).await?;

        Ok(())
    }

    /// Count records in a collection by id.
    pub async fn count_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
    ) -> Result<u64> {
        let path = format!(
            "{}/{}/count",
            Self::collections_path(tenant, database),
            collection_id
        );
        let request = self.request(reqwest::Method::GET, &path)?;
        let response = self.send(request).await?;

        Ok(response.json().await?)
    }
}
