//! The vector-store admin facade.

use uuid::Uuid;

use crate::TRACING_TARGET;
use crate::backend::{RecordBatch, RecordSelector, StoreBackend};
use crate::chroma::ChromaBackend;
use crate::config::ConnectionConfig;
use crate::error::{AdminError, AdminResult};
use crate::record::{
    CollectionRef, PLACEHOLDER_EMBEDDING, QueryRequest, QueryResponse, Record, RecordPage,
};

/// Admin facade over one vector store connection.
///
/// Owns a [`ConnectionConfig`] and delegates every operation to a
/// [`StoreBackend`], normalizing inputs and outputs. Two error policies
/// coexist by design: read and discovery operations degrade to empty results
/// on any failure, while mutating and administrative operations surface
/// errors as [`AdminResult`] values. [`Self::connect`] is its own case and
/// always resolves to a boolean.
#[derive(Default)]
pub struct VectorStoreFacade {
    connection: Option<Connection>,
}

struct Connection {
    config: ConnectionConfig,
    backend: Box<dyn StoreBackend>,
}

impl Connection {
    fn tenant<'a>(&'a self, tenant: Option<&'a str>) -> &'a str {
        tenant
            .or(self.config.tenant.as_deref())
            .unwrap_or(crate::config::DEFAULT_TENANT)
    }

    fn database<'a>(&'a self, database: Option<&'a str>) -> &'a str {
        database
            .or(self.config.database.as_deref())
            .unwrap_or(crate::config::DEFAULT_DATABASE)
    }
}

impl VectorStoreFacade {
    /// Creates a disconnected facade.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects to the store described by `config`.
    ///
    /// Builds a Chroma backend from the coordinates, performs a liveness
    /// check, and stores the configuration on success. On any failure the
    /// facade is left disconnected and `false` is returned; no error detail
    /// is surfaced and no retry is attempted. Any previous connection state
    /// is replaced wholesale.
    pub async fn connect(&mut self, config: ConnectionConfig) -> bool {
        let backend = match ChromaBackend::new(&config) {
            Ok(backend) => Box::new(backend) as Box<dyn StoreBackend>,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %err,
                    "Failed to build store backend"
                );
                self.connection = None;
                return false;
            }
        };

        self.connect_with(config, backend).await
    }

    /// Connects through an explicit backend.
    ///
    /// Used by tests and by callers bringing their own [`StoreBackend`];
    /// applies the same liveness check and state replacement as
    /// [`Self::connect`].
    pub async fn connect_with(
        &mut self,
        config: ConnectionConfig,
        backend: Box<dyn StoreBackend>,
    ) -> bool {
        self.connection = None;

        if let Err(err) = backend.heartbeat().await {
            tracing::warn!(
                target: TRACING_TARGET,
                host = %config.host,
                port = %config.port,
                error = %err,
                "Connection attempt failed"
            );
            return false;
        }

        tracing::info!(
            target: TRACING_TARGET,
            host = %config.host,
            port = %config.port,
            "Connected to vector store"
        );

        self.connection = Some(Connection { config, backend });
        true
    }

    /// Whether the facade holds an established connection. No I/O.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Drops the current connection, if any.
    pub fn disconnect(&mut self) {
        self.connection = None;
    }

    fn connection(&self) -> AdminResult<&Connection> {
        self.connection.as_ref().ok_or(AdminError::NotConnected)
    }

    /// Lists the tenants visible to this connection.
    ///
    /// Discovery beyond the caller's own identity is not supported: the
    /// result is a single-element sequence holding the identity's tenant,
    /// falling back to the configured tenant or the store default when the
    /// identity lookup fails. Disconnected facades return an empty sequence.
    pub async fn list_tenants(&self) -> Vec<String> {
        let Some(conn) = &self.connection else {
            return Vec::new();
        };

        match conn.backend.identity().await {
            Ok(identity) => match identity.tenant {
                Some(tenant) => vec![tenant],
                None => vec![conn.tenant(None).to_string()],
            },
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %err,
                    "Identity lookup failed, falling back to configured tenant"
                );
                vec![conn.tenant(None).to_string()]
            }
        }
    }

    /// Lists database names under a tenant.
    ///
    /// Listing entries map to their `name` field, falling back to `id`, then
    /// to the raw string form; the priority is a best-effort heuristic, not a
    /// guaranteed mapping. Failure or a disconnected facade yields an empty
    /// sequence.
    pub async fn list_databases(&self, tenant: Option<&str>) -> Vec<String> {
        let Some(conn) = &self.connection else {
            return Vec::new();
        };
        let tenant = conn.tenant(tenant);

        match conn.backend.list_databases(tenant).await {
            Ok(entries) => entries.iter().map(database_display_name).collect(),
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    tenant = %tenant,
                    error = %err,
                    "Listing databases failed"
                );
                Vec::new()
            }
        }
    }

    /// Lists collections in a database.
    ///
    /// Failure or a disconnected facade yields an empty sequence.
    pub async fn list_collections(
        &self,
        tenant: Option<&str>,
        database: Option<&str>,
    ) -> Vec<CollectionRef> {
        let Some(conn) = &self.connection else {
            return Vec::new();
        };
        let tenant = conn.tenant(tenant);
        let database = conn.database(database);

        match conn.backend.list_collections(tenant, database).await {
            Ok(collections) => collections,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    tenant = %tenant,
                    database = %database,
                    error = %err,
                    "Listing collections failed"
                );
                Vec::new()
            }
        }
    }

    /// Resolves a collection name or id to the store's collection id.
    ///
    /// Matches a known id first, then a known name; an unknown value passes
    /// through unchanged rather than failing the lookup.
    async fn resolve_collection_id(
        &self,
        tenant: Option<&str>,
        database: Option<&str>,
        name_or_id: &str,
    ) -> String {
        let collections = self.list_collections(tenant, database).await;

        if let Some(collection) = collections.iter().find(|c| c.id == name_or_id) {
            return collection.id.clone();
        }
        if let Some(collection) = collections.iter().find(|c| c.name == name_or_id) {
            return collection.id.clone();
        }

        name_or_id.to_string()
    }

    /// Creates a collection. Requires a connection; propagates store failures.
    pub async fn create_collection(
        &self,
        tenant: Option<&str>,
        database: Option<&str>,
        name: &str,
    ) -> AdminResult<()> {
        let conn = self.connection()?;
        let tenant = conn.tenant(tenant);
        let database = conn.database(database);

        tracing::debug!(
            target: TRACING_TARGET,
            tenant = %tenant,
            database = %database,
            collection = %name,
            "Creating collection"
        );

        conn.backend
            .create_collection(tenant, database, name)
            .await?;
        Ok(())
    }

    /// Deletes a collection by name. Requires a connection; propagates store
    /// failures.
    pub async fn delete_collection(
        &self,
        tenant: Option<&str>,
        database: Option<&str>,
        name: &str,
    ) -> AdminResult<()> {
        let conn = self.connection()?;
        let tenant = conn.tenant(tenant);
        let database = conn.database(database);

        tracing::debug!(
            target: TRACING_TARGET,
            tenant = %tenant,
            database = %database,
            collection = %name,
            "Deleting collection"
        );

        conn.backend.delete_collection(tenant, database, name).await
    }

    /// Renames a collection. Requires a connection; propagates store failures.
    pub async fn rename_collection(
        &self,
        tenant: Option<&str>,
        database: Option<&str>,
        old_name: &str,
        new_name: &str,
    ) -> AdminResult<()> {
        let conn = self.connection()?;
        let collection_id = self
            .resolve_collection_id(tenant, database, old_name)
            .await;
        let tenant = conn.tenant(tenant);
        let database = conn.database(database);

        tracing::debug!(
            target: TRACING_TARGET,
            tenant = %tenant,
            database = %database,
            collection = %collection_id,
            new_name = %new_name,
            "Renaming collection"
        );

        conn.backend
            .rename_collection(tenant, database, &collection_id, new_name)
            .await
    }

    /// Lists records in a collection within a pagination window.
    ///
    /// Parallel result arrays zip positionally: the i-th id corresponds to
    /// the i-th document, metadata, and embedding. Failure or a disconnected
    /// facade yields an empty sequence.
    pub async fn list_records(
        &self,
        tenant: Option<&str>,
        database: Option<&str>,
        collection: &str,
        page: RecordPage,
    ) -> Vec<Record> {
        let Some(conn) = &self.connection else {
            return Vec::new();
        };
        let collection_id = self
            .resolve_collection_id(tenant, database, collection)
            .await;
        let tenant = conn.tenant(tenant);
        let database = conn.database(database);

        let selector = RecordSelector::window(page.limit, page.offset);
        match conn
            .backend
            .get_records(tenant, database, &collection_id, selector)
            .await
        {
            Ok(batch) => zip_batch(batch),
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    collection = %collection_id,
                    error = %err,
                    "Listing records failed"
                );
                Vec::new()
            }
        }
    }

    /// Fetches a single record by id.
    ///
    /// Returns `None` when the record does not exist, the operation fails, or
    /// the facade is disconnected.
    pub async fn get_record(
        &self,
        tenant: Option<&str>,
        database: Option<&str>,
        collection: &str,
        id: &str,
    ) -> Option<Record> {
        let conn = self.connection.as_ref()?;
        let collection_id = self
            .resolve_collection_id(tenant, database, collection)
            .await;
        let tenant = conn.tenant(tenant);
        let database = conn.database(database);

        let selector = RecordSelector::by_ids(vec![id.to_string()]);
        match conn
            .backend
            .get_records(tenant, database, &collection_id, selector)
            .await
        {
            Ok(batch) => zip_batch(batch).into_iter().next(),
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    collection = %collection_id,
                    record = %id,
                    error = %err,
                    "Fetching record failed"
                );
                None
            }
        }
    }

    /// Adds a record to a collection, creating the collection if absent.
    ///
    /// An empty record id is replaced with a generated one (time plus random
    /// bits, unique with high probability). An absent or empty embedding is
    /// replaced with the placeholder vector, and empty metadata is omitted
    /// from the write entirely rather than sent as an empty mapping. Returns
    /// the resolved id; requires a connection and propagates store failures.
    pub async fn add_record(
        &self,
        tenant: Option<&str>,
        database: Option<&str>,
        collection: &str,
        record: Record,
    ) -> AdminResult<String> {
        let conn = self.connection()?;
        let tenant = conn.tenant(tenant);
        let database = conn.database(database);

        let id = if record.id.is_empty() {
            Uuid::now_v7().to_string()
        } else {
            record.id
        };
        let embedding = match record.embedding {
            Some(embedding) if !embedding.is_empty() => embedding,
            _ => PLACEHOLDER_EMBEDDING.to_vec(),
        };
        let metadata = record.metadata.filter(|metadata| !metadata.is_empty());

        let collection_id = self
            .ensure_collection(conn, tenant, database, collection)
            .await?;

        tracing::debug!(
            target: TRACING_TARGET,
            collection = %collection_id,
            record = %id,
            "Adding record"
        );

        let batch = RecordBatch {
            ids: vec![id.clone()],
            documents: record.document.map(|document| vec![Some(document)]),
            metadatas: metadata.map(|metadata| vec![Some(metadata)]),
            embeddings: Some(vec![Some(embedding)]),
        };
        conn.backend
            .add_records(tenant, database, &collection_id, batch)
            .await?;

        Ok(id)
    }

    /// Partially updates a record; only fields present in the input change.
    ///
    /// Embedding selection is three-tiered: a supplied non-empty embedding is
    /// used as-is; otherwise the record's current embedding is fetched and
    /// reused, so the store does not try to auto-compute one; otherwise
    /// embeddings are omitted from the update and the store applies its own
    /// default behavior. Requires a connection and a record id; propagates
    /// store failures.
    pub async fn update_record(
        &self,
        tenant: Option<&str>,
        database: Option<&str>,
        collection: &str,
        record: Record,
    ) -> AdminResult<()> {
        let conn = self.connection()?;
        if record.id.is_empty() {
            return Err(AdminError::MissingRecordId);
        }

        let collection_id = self
            .resolve_collection_id(tenant, database, collection)
            .await;

        let embedding = match record.embedding {
            Some(embedding) if !embedding.is_empty() => Some(embedding),
            _ => self
                .get_record(tenant, database, collection, &record.id)
                .await
                .and_then(|existing| existing.embedding)
                .filter(|embedding| !embedding.is_empty()),
        };

        let tenant = conn.tenant(tenant);
        let database = conn.database(database);

        tracing::debug!(
            target: TRACING_TARGET,
            collection = %collection_id,
            record = %record.id,
            "Updating record"
        );

        let batch = RecordBatch {
            ids: vec![record.id],
            documents: record.document.map(|document| vec![Some(document)]),
            metadatas: record.metadata.map(|metadata| vec![Some(metadata)]),
            embeddings: embedding.map(|embedding| vec![Some(embedding)]),
        };
        conn.backend
            .update_records(tenant, database, &collection_id, batch)
            .await
    }

    /// Deletes a record by id. Requires a connection; propagates store
    /// failures.
    pub async fn delete_record(
        &self,
        tenant: Option<&str>,
        database: Option<&str>,
        collection: &str,
        id: &str,
    ) -> AdminResult<()> {
        let conn = self.connection()?;
        let collection_id = self
            .resolve_collection_id(tenant, database, collection)
            .await;
        let tenant = conn.tenant(tenant);
        let database = conn.database(database);

        tracing::debug!(
            target: TRACING_TARGET,
            collection = %collection_id,
            record = %id,
            "Deleting record"
        );

        conn.backend
            .delete_records(tenant, database, &collection_id, vec![id.to_string()])
            .await
    }

    /// Runs a similarity query against a collection.
    ///
    /// Query texts and embeddings pass through as given, with the requested
    /// result count; the store's result structure is returned unmodified.
    /// Failure or a disconnected facade yields an empty response.
    pub async fn query_collection(
        &self,
        tenant: Option<&str>,
        database: Option<&str>,
        collection: &str,
        request: QueryRequest,
    ) -> QueryResponse {
        let Some(conn) = &self.connection else {
            return QueryResponse::default();
        };
        let collection_id = self
            .resolve_collection_id(tenant, database, collection)
            .await;
        let tenant = conn.tenant(tenant);
        let database = conn.database(database);

        match conn
            .backend
            .query(tenant, database, &collection_id, &request)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    collection = %collection_id,
                    error = %err,
                    "Query failed"
                );
                QueryResponse::default()
            }
        }
    }

    /// Creates a tenant. Requires a connection; propagates store failures.
    pub async fn create_tenant(&self, name: &str) -> AdminResult<()> {
        let conn = self.connection()?;

        tracing::debug!(
            target: TRACING_TARGET,
            tenant = %name,
            "Creating tenant"
        );

        conn.backend.create_tenant(name).await
    }

    /// Creates a database under a tenant. Requires a connection; propagates
    /// store failures.
    pub async fn create_database(&self, tenant: Option<&str>, name: &str) -> AdminResult<()> {
        let conn = self.connection()?;
        let tenant = conn.tenant(tenant);

        tracing::debug!(
            target: TRACING_TARGET,
            tenant = %tenant,
            database = %name,
            "Creating database"
        );

        conn.backend.create_database(tenant, name).await
    }

    /// Deletes a database under a tenant. Requires a connection; propagates
    /// store failures.
    pub async fn delete_database(&self, tenant: Option<&str>, name: &str) -> AdminResult<()> {
        let conn = self.connection()?;
        let tenant = conn.tenant(tenant);

        tracing::debug!(
            target: TRACING_TARGET,
            tenant = %tenant,
            database = %name,
            "Deleting database"
        );

        conn.backend.delete_database(tenant, name).await
    }

    /// Resolves the target collection id, creating the collection when it
    /// does not exist yet.
    async fn ensure_collection(
        &self,
        conn: &Connection,
        tenant: &str,
        database: &str,
        name_or_id: &str,
    ) -> AdminResult<String> {
        let collections = conn.backend.list_collections(tenant, database).await?;
        if let Some(collection) = collections
            .iter()
            .find(|c| c.id == name_or_id || c.name == name_or_id)
        {
            return Ok(collection.id.clone());
        }

        let created = conn
            .backend
            .create_collection(tenant, database, name_or_id)
            .await?;
        Ok(created.id)
    }
}

impl std::fmt::Debug for VectorStoreFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStoreFacade")
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Maps a database listing entry to a display name.
///
/// Best-effort field priority: `name`, then `id`, then the raw string form.
fn database_display_name(value: &serde_json::Value) -> String {
    if let Some(name) = value.get("name").and_then(|v| v.as_str()) {
        return name.to_string();
    }
    if let Some(id) = value.get("id").and_then(|v| v.as_str()) {
        return id.to_string();
    }
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Zips the store's parallel arrays into flat records, positionally.
fn zip_batch(batch: RecordBatch) -> Vec<Record> {
    batch
        .ids
        .into_iter()
        .enumerate()
        .map(|(i, id)| Record {
            id,
            document: batch
                .documents
                .as_ref()
                .and_then(|documents| documents.get(i).cloned().flatten()),
            metadata: batch
                .metadatas
                .as_ref()
                .and_then(|metadatas| metadatas.get(i).cloned().flatten()),
            embedding: batch
                .embeddings
                .as_ref()
                .and_then(|embeddings| embeddings.get(i).cloned().flatten()),
        })
        .collect()
}
