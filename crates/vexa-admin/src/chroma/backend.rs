//! Chroma backend implementation.

use async_trait::async_trait;
use vexa_chroma::api::{QueryRecordsRequest, RecordPayload, RecordsResponse};
use vexa_chroma::{ChromaClient, ChromaConfig, ChromaCredentials};

use crate::TRACING_TARGET;
use crate::backend::{Identity, RecordBatch, RecordSelector, StoreBackend};
use crate::config::ConnectionConfig;
use crate::error::AdminResult;
use crate::record::{CollectionRef, QueryRequest, QueryResponse};

/// Chroma backend implementation.
pub struct ChromaBackend {
    client: ChromaClient,
}

impl ChromaBackend {
    /// Creates a new Chroma backend from connection coordinates.
    ///
    /// Construction does not touch the network; the facade follows up with a
    /// heartbeat before treating the connection as established.
    pub fn new(config: &ConnectionConfig) -> AdminResult<Self> {
        let chroma_config = ChromaConfig::builder()
            .with_base_url(&config.base_url())?
            .build()
            .map_err(|e| vexa_chroma::Error::invalid_config(e.to_string()))?;

        let credentials = match &config.api_key {
            Some(token) => ChromaCredentials::bearer_token(token),
            None => ChromaCredentials::none(),
        };

        let client = ChromaClient::new(chroma_config, credentials)?;

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url(),
            "Chroma backend initialized"
        );

        Ok(Self { client })
    }

    fn batch_to_payload(batch: RecordBatch) -> RecordPayload {
        RecordPayload {
            ids: batch.ids,
            documents: batch.documents,
            metadatas: batch.metadatas,
            embeddings: batch.embeddings,
        }
    }

    fn response_to_batch(response: RecordsResponse) -> RecordBatch {
        RecordBatch {
            ids: response.ids,
            documents: response.documents,
            metadatas: response.metadatas,
            embeddings: response.embeddings,
        }
    }
}

#[async_trait]
impl StoreBackend for ChromaBackend {
    async fn heartbeat(&self) -> AdminResult<()> {
        self.client.heartbeat().await?;
        Ok(())
    }

    async fn identity(&self) -> AdminResult<Identity> {
        let identity = self.client.get_identity().await?;
        Ok(Identity {
            tenant: identity.tenant,
        })
    }

    async fn create_tenant(&self, name: &str) -> AdminResult<()> {
        self.client.create_tenant(name).await?;
        Ok(())
    }

    async fn list_databases(&self, tenant: &str) -> AdminResult<Vec<serde_json::Value>> {
        Ok(self.client.list_databases(tenant).await?)
    }

    async fn create_database(&self, tenant: &str, name: &str) -> AdminResult<()> {
        self.client.create_database(tenant, name).await?;
        Ok(())
    }

    async fn delete_database(&self, tenant: &str, name: &str) -> AdminResult<()> {
        self.client.delete_database(tenant, name).await?;
        Ok(())
    }

    async fn list_collections(
        &self,
        tenant: &str,
        database: &str,
    ) -> AdminResult<Vec<CollectionRef>> {
        let collections = self.client.list_collections(tenant, database).await?;

        let mut refs = Vec::with_capacity(collections.len());
        for collection in collections {
            // Listings rarely carry a count; fetch one per collection and
            // fall back to 0 rather than failing the whole listing.
            let count = match collection.count {
                Some(count) => count,
                None => self
                    .client
                    .count_records(tenant, database, &collection.id)
                    .await
                    .unwrap_or(0),
            };
            refs.push(CollectionRef {
                id: collection.id,
                name: collection.name,
                approximate_count: count,
            });
        }

        Ok(refs)
    }

    async fn create_collection(
        &self,
        tenant: &str,
        database: &str,
        name: &str,
    ) -> AdminResult<CollectionRef> {
        let collection = self
            .client
            .create_collection(tenant, database, name, true)
            .await?;

        Ok(CollectionRef {
            id: collection.id,
            name: collection.name,
            approximate_count: collection.count.unwrap_or(0),
        })
    }

    async fn delete_collection(
        &self,
        tenant: &str,
        database: &str,
        name: &str,
    ) -> AdminResult<()> {
        self.client.delete_collection(tenant, database, name).await?;
        Ok(())
    }

    async fn rename_collection(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        new_name: &str,
    ) -> AdminResult<()> {
        self.client
            .update_collection(tenant, database, collection_id, new_name)
            .await?;
        Ok(())
    }

    async fn get_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        selector: RecordSelector,
    ) -> AdminResult<RecordBatch> {
        let response = self
            .client
            .get_records(
                tenant,
                database,
                collection_id,
                selector.ids,
                selector.limit,
                selector.offset,
            )
            .await?;

        Ok(Self::response_to_batch(response))
    }

    async fn add_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        batch: RecordBatch,
    ) -> AdminResult<()> {
        self.client
            .add_records(tenant, database, collection_id, &Self::batch_to_payload(batch))
            .await?;
        Ok(())
    }

    async fn update_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        batch: RecordBatch,
    ) -> AdminResult<()> {
        self.client
            .update_records(tenant, database, collection_id, &Self::batch_to_payload(batch))
            .await?;
        Ok(())
    }

    async fn delete_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        ids: Vec<String>,
    ) -> AdminResult<()> {
        self.client
            .delete_records(tenant, database, collection_id, ids)
            .await?;
        Ok(())
    }

    async fn query(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        request: &QueryRequest,
    ) -> AdminResult<QueryResponse> {
        let wire_request = QueryRecordsRequest::new(
            request.query_texts.clone(),
            request.query_embeddings.clone(),
            request.top_k,
        );

        let response = self
            .client
            .query_records(tenant, database, collection_id, &wire_request)
            .await?;

        Ok(QueryResponse {
            ids: response.ids,
            documents: response.documents,
            metadatas: response.metadatas,
            distances: response.distances,
        })
    }
}
