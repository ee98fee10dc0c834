//! In-memory store backend for facade tests.
//!
//! Holds tenants, databases, collections, and records behind a mutex and
//! captures the last write and query payloads so tests can assert on exactly
//! what the facade sent.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backend::{Identity, RecordBatch, RecordSelector, StoreBackend};
use crate::error::{AdminError, AdminResult};
use crate::record::{CollectionRef, Metadata, QueryRequest, QueryResponse};

#[derive(Debug, Clone, Default)]
pub(crate) struct MockRecord {
    pub id: String,
    pub document: Option<String>,
    pub metadata: Option<Metadata>,
    pub embedding: Option<Vec<f32>>,
}

#[derive(Debug, Default)]
struct MockCollection {
    id: String,
    name: String,
    records: Vec<MockRecord>,
}

#[derive(Debug, Default)]
struct MockState {
    unhealthy: bool,
    fail_identity: bool,
    fail_requests: bool,
    identity_tenant: Option<String>,
    tenants: Vec<String>,
    databases: Vec<serde_json::Value>,
    collections: Vec<MockCollection>,
    next_collection: u32,
    last_add: Option<RecordBatch>,
    last_update: Option<RecordBatch>,
    last_query: Option<QueryRequest>,
}

impl MockState {
    fn check(&self) -> AdminResult<()> {
        if self.fail_requests {
            Err(AdminError::backend("injected failure"))
        } else {
            Ok(())
        }
    }

    fn new_collection(&mut self, name: &str) -> usize {
        self.next_collection += 1;
        self.collections.push(MockCollection {
            id: format!("col-{}", self.next_collection),
            name: name.to_string(),
            records: Vec::new(),
        });
        self.collections.len() - 1
    }

    fn collection_by_id(&mut self, id: &str) -> AdminResult<&mut MockCollection> {
        self.collections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AdminError::backend(format!("collection not found: {id}")))
    }
}

/// Shared-state fake backend; clones see the same store.
#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unhealthy() -> Self {
        let backend = Self::new();
        backend.state.lock().unwrap().unhealthy = true;
        backend
    }

    pub fn set_identity_tenant(&self, tenant: &str) {
        self.state.lock().unwrap().identity_tenant = Some(tenant.to_string());
    }

    pub fn set_fail_identity(&self) {
        self.state.lock().unwrap().fail_identity = true;
    }

    pub fn set_fail_requests(&self, fail: bool) {
        self.state.lock().unwrap().fail_requests = fail;
    }

    pub fn set_databases(&self, databases: Vec<serde_json::Value>) {
        self.state.lock().unwrap().databases = databases;
    }

    /// Seeds a record directly, bypassing the facade's defaulting rules.
    pub fn insert_raw(&self, collection: &str, record: MockRecord) {
        let mut state = self.state.lock().unwrap();
        let index = match state.collections.iter().position(|c| c.name == collection) {
            Some(index) => index,
            None => state.new_collection(collection),
        };
        state.collections[index].records.push(record);
    }

    pub fn last_add(&self) -> Option<RecordBatch> {
        self.state.lock().unwrap().last_add.clone()
    }

    pub fn last_update(&self) -> Option<RecordBatch> {
        self.state.lock().unwrap().last_update.clone()
    }

    pub fn last_query(&self) -> Option<QueryRequest> {
        self.state.lock().unwrap().last_query.clone()
    }

    pub fn tenants(&self) -> Vec<String> {
        self.state.lock().unwrap().tenants.clone()
    }
}

#[async_trait]
impl StoreBackend for MockBackend {
    async fn heartbeat(&self) -> AdminResult<()> {
        let state = self.state.lock().unwrap();
        if state.unhealthy {
            Err(AdminError::backend("store unreachable"))
        } else {
            Ok(())
        }
    }

    async fn identity(&self) -> AdminResult<Identity> {
        let state = self.state.lock().unwrap();
        if state.fail_identity {
            return Err(AdminError::backend("identity unavailable"));
        }
        Ok(Identity {
            tenant: state.identity_tenant.clone(),
        })
    }

    async fn create_tenant(&self, name: &str) -> AdminResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        state.tenants.push(name.to_string());
        Ok(())
    }

    async fn list_databases(&self, _tenant: &str) -> AdminResult<Vec<serde_json::Value>> {
        let state = self.state.lock().unwrap();
        state.check()?;
        Ok(state.databases.clone())
    }

    async fn create_database(&self, _tenant: &str, name: &str) -> AdminResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        state.databases.push(serde_json::json!({ "name": name }));
        Ok(())
    }

    async fn delete_database(&self, _tenant: &str, name: &str) -> AdminResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        state
            .databases
            .retain(|db| db.get("name").and_then(|n| n.as_str()) != Some(name));
        Ok(())
    }

    async fn list_collections(
        &self,
        _tenant: &str,
        _database: &str,
    ) -> AdminResult<Vec<CollectionRef>> {
        let state = self.state.lock().unwrap();
        state.check()?;
        Ok(state
            .collections
            .iter()
            .map(|c| CollectionRef {
                id: c.id.clone(),
                name: c.name.clone(),
                approximate_count: c.records.len() as u64,
            })
            .collect())
    }

    async fn create_collection(
        &self,
        _tenant: &str,
        _database: &str,
        name: &str,
    ) -> AdminResult<CollectionRef> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let index = match state.collections.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => state.new_collection(name),
        };
        let collection = &state.collections[index];
        Ok(CollectionRef {
            id: collection.id.clone(),
            name: collection.name.clone(),
            approximate_count: collection.records.len() as u64,
        })
    }

    async fn delete_collection(
        &self,
        _tenant: &str,
        _database: &str,
        name: &str,
    ) -> AdminResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let before = state.collections.len();
        state.collections.retain(|c| c.name != name);
        if state.collections.len() == before {
            return Err(AdminError::backend(format!("collection not found: {name}")));
        }
        Ok(())
    }

    async fn rename_collection(
        &self,
        _tenant: &str,
        _database: &str,
        collection_id: &str,
        new_name: &str,
    ) -> AdminResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let collection = state.collection_by_id(collection_id)?;
        collection.name = new_name.to_string();
        Ok(())
    }

    async fn get_records(
        &self,
        _tenant: &str,
        _database: &str,
        collection_id: &str,
        selector: RecordSelector,
    ) -> AdminResult<RecordBatch> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let collection = state.collection_by_id(collection_id)?;

        let selected: Vec<MockRecord> = match &selector.ids {
            Some(ids) => collection
                .records
                .iter()
                .filter(|r| ids.contains(&r.id))
                .cloned()
                .collect(),
            None => collection
                .records
                .iter()
                .skip(selector.offset.unwrap_or(0))
                .take(selector.limit.unwrap_or(usize::MAX))
                .cloned()
                .collect(),
        };

        Ok(RecordBatch {
            ids: selected.iter().map(|r| r.id.clone()).collect(),
            documents: Some(selected.iter().map(|r| r.document.clone()).collect()),
            metadatas: Some(selected.iter().map(|r| r.metadata.clone()).collect()),
            embeddings: Some(selected.iter().map(|r| r.embedding.clone()).collect()),
        })
    }

    async fn add_records(
        &self,
        _tenant: &str,
        _database: &str,
        collection_id: &str,
        batch: RecordBatch,
    ) -> AdminResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        state.last_add = Some(batch.clone());

        let collection = state.collection_by_id(collection_id)?;
        for (i, id) in batch.ids.iter().enumerate() {
            collection.records.push(MockRecord {
                id: id.clone(),
                document: batch
                    .documents
                    .as_ref()
                    .and_then(|d| d.get(i).cloned().flatten()),
                metadata: batch
                    .metadatas
                    .as_ref()
                    .and_then(|m| m.get(i).cloned().flatten()),
                embedding: batch
                    .embeddings
                    .as_ref()
                    .and_then(|e| e.get(i).cloned().flatten()),
            });
        }
        Ok(())
    }

    async fn update_records(
        &self,
        _tenant: &str,
        _database: &str,
        collection_id: &str,
        batch: RecordBatch,
    ) -> AdminResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        state.last_update = Some(batch.clone());

        let collection = state.collection_by_id(collection_id)?;
        for (i, id) in batch.ids.iter().enumerate() {
            let Some(record) = collection.records.iter_mut().find(|r| &r.id == id) else {
                continue;
            };
            if let Some(documents) = &batch.documents {
                record.document = documents.get(i).cloned().flatten();
            }
            if let Some(metadatas) = &batch.metadatas {
                record.metadata = metadatas.get(i).cloned().flatten();
            }
            if let Some(embeddings) = &batch.embeddings {
                record.embedding = embeddings.get(i).cloned().flatten();
            }
        }
        Ok(())
    }

    async fn delete_records(
        &self,
        _tenant: &str,
        _database: &str,
        collection_id: &str,
        ids: Vec<String>,
    ) -> AdminResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let collection = state.collection_by_id(collection_id)?;
        collection.records.retain(|r| !ids.contains(&r.id));
        Ok(())
    }

    async fn query(
        &self,
        _tenant: &str,
        _database: &str,
        collection_id: &str,
        request: &QueryRequest,
    ) -> AdminResult<QueryResponse> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        state.last_query = Some(request.clone());

        let top_k = request.top_k;
        let collection = state.collection_by_id(collection_id)?;
        let matches: Vec<&MockRecord> = collection.records.iter().take(top_k).collect();

        Ok(QueryResponse {
            ids: vec![matches.iter().map(|r| r.id.clone()).collect()],
            documents: Some(vec![matches.iter().map(|r| r.document.clone()).collect()]),
            metadatas: Some(vec![matches.iter().map(|r| r.metadata.clone()).collect()]),
            distances: Some(vec![
                matches.iter().enumerate().map(|(i, _)| i as f32 * 0.1).collect(),
            ]),
        })
    }
}
