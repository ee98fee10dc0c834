//! Record operations: add, get, update, delete, and similarity query.
//!
//! Record payloads and responses use the store's parallel-array shape: the
//! i-th entry of `ids` corresponds to the i-th entry of `documents`,
//! `metadatas`, and `embeddings`. A field that is `None` is omitted from the
//! wire payload entirely, which the store treats differently from an empty or
//! null value.

use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_API;
use crate::client::{API_PREFIX, ChromaClient};
use crate::error::Result;

/// Record metadata: a flat JSON object.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// The full include set requested on every read path.
const FULL_INCLUDE: [&str; 3] = ["documents", "metadatas", "embeddings"];

/// Parallel-array record payload for add and update calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordPayload {
    /// Record ids, one per entry.
    pub ids: Vec<String>,
    /// Documents aligned with `ids`; omitted from the wire when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Option<String>>>,
    /// Metadata objects aligned with `ids`; omitted from the wire when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadatas: Option<Vec<Option<Metadata>>>,
    /// Embeddings aligned with `ids`; omitted from the wire when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeddings: Option<Vec<Option<Vec<f32>>>>,
}

/// Parallel-array response from a get call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsResponse {
    /// Record ids.
    #[serde(default)]
    pub ids: Vec<String>,
    /// Documents aligned with `ids`, when requested.
    #[serde(default)]
    pub documents: Option<Vec<Option<String>>>,
    /// Metadata objects aligned with `ids`, when requested.
    #[serde(default)]
    pub metadatas: Option<Vec<Option<Metadata>>>,
    /// Embeddings aligned with `ids`, when requested.
    #[serde(default)]
    pub embeddings: Option<Vec<Option<Vec<f32>>>>,
}

/// Similarity query request.
///
/// Either `query_texts` or `query_embeddings` should be set; both are passed
/// through when the store supports it.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRecordsRequest {
    /// Query texts to embed server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_texts: Option<Vec<String>>,
    /// Pre-computed query embeddings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_embeddings: Option<Vec<Vec<f32>>>,
    /// Number of results per query.
    pub n_results: usize,
    /// Result fields to include.
    pub include: Vec<String>,
}

impl QueryRecordsRequest {
    /// Creates a query request with the full include set.
    pub fn new(
        query_texts: Option<Vec<String>>,
        query_embeddings: Option<Vec<Vec<f32>>>,
        n_results: usize,
    ) -> Self {
        Self {
            query_texts,
            query_embeddings,
            n_results,
            include: FULL_INCLUDE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Similarity query response: parallel arrays nested per query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRecordsResponse {
    /// Matched ids, one inner array per query.
    #[serde(default)]
    pub ids: Vec<Vec<String>>,
    /// Matched documents aligned with `ids`.
    #[serde(default)]
    pub documents: Option<Vec<Vec<Option<String>>>>,
    /// Matched metadata aligned with `ids`.
    #[serde(default)]
    pub metadatas: Option<Vec<Vec<Option<Metadata>>>>,
    /// Distances aligned with `ids`.
    #[serde(default)]
    pub distances: Option<Vec<Vec<f32>>>,
}

#[derive(Debug, Serialize)]
struct GetRecordsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<usize>,
    include: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct DeleteRecordsRequest {
    ids: Vec<String>,
}

impl ChromaClient {
    fn records_path(tenant: &str, database: &str, collection_id: &str, op: &str) -> String {
        format!(
            "{API_PREFIX}/tenants/{tenant}/databases/{database}/collections/{collection_id}/{op}"
        )
    }

    /// Add records to a collection.
    pub async fn add_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        payload: &RecordPayload,
    ) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            collection = %collection_id,
            count = %payload.ids.len(),
            "Adding records"
        );

        let path = Self::records_path(tenant, database, collection_id, "add");
        let request = self.request(reqwest::Method::POST, &path)?.json(payload);
        self.send(request).await?;

        Ok(())
    }

    /// Get records by ids or by limit/offset window, with the full include set.
    pub async fn get_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        ids: Option<Vec<String>>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<RecordsResponse> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            collection = %collection_id,
            "Getting records"
        );

        let path = Self::records_path(tenant, database, collection_id, "get");
        let request = self
            .request(reqwest::Method::POST, &path)?
            .json(&GetRecordsRequest {
                ids,
                limit,
                offset,
                include: FULL_INCLUDE.to_vec(),
            });
        let response = self.send(request).await?;

        Ok(response.json().await?)
    }

    /// Update existing records; only fields present in the payload change.
    pub async fn update_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        payload: &RecordPayload,
    ) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            collection = %collection_id,
            count = %payload.ids.len(),
            "Updating records"
        );

        let path = Self::records_path(tenant, database, collection_id, "update");
        let request = self.request(reqwest::Method::POST, &path)?.json(payload);
        self.send(request).await?;

        Ok(())
    }

    /// Delete records by id.
    pub async fn delete_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        ids: Vec<String>,
    ) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            collection = %collection_id,
            count = %ids.len(),
            "Deleting records"
        );

        let path = Self::records_path(tenant, database, collection_id, "delete");
        let request = self
            .request(reqwest::Method::POST, &path)?
            .json(&DeleteRecordsRequest { ids });
        self.send(request).await?;

        Ok(())
    }

    /// Run a similarity query against a collection.
    pub async fn query_records(
        &self,
        tenant: &str,
        database: &str,
        collection_id: &str,
        query: &QueryRecordsRequest,
    ) -> Result<QueryRecordsResponse> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            collection = %collection_id,
            n_results = %query.n_results,
            "Querying records"
        );

        let path = Self::records_path(tenant, database, collection_id, "query");
        let request = self.request(reqwest::Method::POST, &path)?.json(query);
        let response = self.send(request).await?;

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_omits_absent_fields() {
        let payload = RecordPayload {
            ids: vec!["a".into()],
            documents: Some(vec![Some("hello".into())]),
            metadatas: None,
            embeddings: Some(vec![Some(vec![0.0])]),
        };

        let json = serde_json::to_value(&payload).expect("Valid payload");
        let obj = json.as_object().expect("Object payload");

        assert!(obj.contains_key("documents"));
        assert!(obj.contains_key("embeddings"));
        assert!(!obj.contains_key("metadatas"));
    }

    #[test]
    fn test_payload_keeps_present_metadata() {
        let mut metadata = Metadata::new();
        metadata.insert("source".into(), serde_json::json!("test"));

        let payload = RecordPayload {
            ids: vec!["a".into()],
            metadatas: Some(vec![Some(metadata)]),
            ..Default::default()
        };

        let json = serde_json::to_value(&payload).expect("Valid payload");
        assert_eq!(json["metadatas"][0]["source"], "test");
    }

    #[test]
    fn test_query_request_include_set() {
        let request = QueryRecordsRequest::new(Some(vec!["hello".into()]), None, 5);

        let json = serde_json::to_value(&request).expect("Valid request");
        let obj = json.as_object().expect("Object request");

        assert_eq!(json["n_results"], 5);
        assert!(!obj.contains_key("query_embeddings"));
        assert_eq!(
            json["include"],
            serde_json::json!(["documents", "metadatas", "embeddings"])
        );
    }

    #[test]
    fn test_records_response_defaults() {
        let response: RecordsResponse = serde_json::from_str(r#"{"ids": ["a", "b"]}"#)
            .expect("Valid response");

        assert_eq!(response.ids, vec!["a", "b"]);
        assert!(response.documents.is_none());
        assert!(response.metadatas.is_none());
        assert!(response.embeddings.is_none());
    }
}
