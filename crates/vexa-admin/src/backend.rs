//! Store backend trait: the seam between the facade and a concrete client.
//!
//! Scoping is per call: every method takes the tenant and database it operates
//! under, so an implementation builds a freshly scoped request each time
//! instead of holding one long-lived scoped session. Connection reuse below
//! that level is the implementation's concern.

use async_trait::async_trait;

use crate::error::AdminResult;
use crate::record::{CollectionRef, Metadata, QueryRequest, QueryResponse};

/// The caller's identity as reported by the store.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    /// Tenant the credential is scoped to, when the store reports one.
    pub tenant: Option<String>,
}

/// Records in the store's parallel-array shape.
///
/// The i-th entry of `ids` corresponds to the i-th entry of every other
/// array. An array that is `None` is absent from the wire payload entirely,
/// which stores treat differently from an array of nulls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBatch {
    /// Record ids.
    pub ids: Vec<String>,
    /// Documents aligned with `ids`.
    pub documents: Option<Vec<Option<String>>>,
    /// Metadata objects aligned with `ids`.
    pub metadatas: Option<Vec<Option<Metadata>>>,
    /// Embeddings aligned with `ids`.
    pub embeddings: Option<Vec<Option<Vec<f32>>>>,
}

impl RecordBatch {
    /// Number of records in the batch.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the batch holds no records.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Which records a get call targets: explicit ids or a pagination window.
#[derive(Debug, Clone, Default)]
pub struct RecordSelector {
    /// Specific record ids to fetch.
    pub ids: Option<Vec<String>>,
    /// Maximum number of records to return.
    pub limit: Option<usize>,
    /// Number of records to skip.
    pub offset: Option<usize>,
}

impl RecordSelector {
    /// Selects records by id.
    pub fn by_ids(ids: Vec<String>) -> Self {
        Self {
            ids: Some(ids),
            ..Self::default()
        }
    }

    /// Selects a window of records in insertion order.
    pub fn window(limit: usize, offset: usize) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            ..Self::default()
        }
    }
}

/// Trait for store backends.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Lightweight liveness check.
    async fn heartbeat(&self) -> AdminResult<()>;

    /// Resolves the caller's identity.
    async fn identity(&self) -> AdminResult<Identity>;

    /// Creates a tenant.
    async fn create_tenant(&self, name: &str) -> AdminResult<()>;

    /// Lists databases under a tenant as raw JSON entries.
    ///
    /// The listing shape varies across store versions; callers apply their
    /// own best-effort field mapping.
    async fn list_databases(&self, tenant: &str) -> AdminResult<Vec<serde_json::Value>>;

    /// Creates a database under a tenant.
    async fn create_database(&self, tenant: &str, name: &str) -> AdminResult<()>;

    /// Deletes a database and everything in it.
    async fn delete_database(&self, tenant: &str, name: &str) -> AdminResult<()>;

    /// Lists collections in a database.
    async fn list_collections(
        &self,
        tenant: &str,
        database: &str,
    ) -> AdminResult<Vec<CollectionRef>>;

    /// Creates a collection, or fetches it if it already exists.
    async fn create_collection(
        &self,
        tenant: &str,
        database: &str,
        name: &str,
    ) -> AdminResult<CollectionRef>;

    /// Deletes a collection by name.
    async fn delete_collection(&self, tenant: &str, database: &str, name: &str)
    -> AdminResult<()>;

    /// Renames a collection by id.
    async fn rename_collection(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        new_name: &str,
    ) -> AdminResult<()>;

    /// Gets records with documents, metadata, and embeddings included.
    async fn get_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        selector: RecordSelector,
    ) -> AdminResult<RecordBatch>;

    /// Adds records to a collection.
    async fn add_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        batch: RecordBatch,
    ) -> AdminResult<()>;

    /// Updates existing records; only arrays present in the batch change.
    async fn update_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        batch: RecordBatch,
    ) -> AdminResult<()>;

    /// Deletes records by id.
    async fn delete_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        ids: Vec<String>,
    ) -> AdminResult<()>;

    /// Runs a similarity query against a collection.
    async fn query(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        request: &QueryRequest,
    ) -> AdminResult<QueryResponse>;
}
