//! Record, collection, and query types exposed by the facade.

use serde::{Deserialize, Serialize};

/// Record metadata: a flat JSON object.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Placeholder vector substituted when no real embedding is available.
///
/// Stores that have no embedding function configured for a collection reject
/// inserts without a vector; a single-element zero vector satisfies that
/// precondition. The facade never sends an empty-length embedding.
pub const PLACEHOLDER_EMBEDDING: [f32; 1] = [0.0];

/// A record in a collection, flattened from the store's parallel arrays.
///
/// `id` is the only required, stable identity. An empty `id` on insert is
/// treated as absent and replaced with a generated one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier within the collection.
    pub id: String,
    /// Optional document text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    /// Optional metadata mapping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Optional embedding vector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Record {
    /// Creates a new record with an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the document text.
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Sets the metadata mapping.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Adds a single metadata field.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value);
        self
    }

    /// Sets the embedding vector.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

/// A collection reference from a listing.
///
/// `name` is the primary human-facing key; `id` may differ from the name and
/// is resolved via a lookup when the two diverge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRef {
    /// Store-assigned collection id.
    pub id: String,
    /// Human-facing collection name.
    pub name: String,
    /// Approximate record count; 0 when the store reports none.
    pub approximate_count: u64,
}

/// Pagination window for record listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordPage {
    /// Maximum number of records to return.
    pub limit: usize,
    /// Number of records to skip.
    pub offset: usize,
}

impl Default for RecordPage {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

impl RecordPage {
    /// Creates a page window.
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }
}

/// A similarity query.
///
/// Exactly one of `query_texts`/`query_embeddings` is expected to be
/// meaningful at a time; both are passed through when the store supports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Query texts to embed server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_texts: Option<Vec<String>>,
    /// Pre-computed query embeddings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_embeddings: Option<Vec<Vec<f32>>>,
    /// Number of results per query.
    pub top_k: usize,
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            query_texts: None,
            query_embeddings: None,
            top_k: 5,
        }
    }
}

impl QueryRequest {
    /// Creates an empty query request with the default result count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.query_texts.get_or_insert_default().push(text.into());
        self
    }

    /// Adds a query embedding.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.query_embeddings.get_or_insert_default().push(embedding);
        self
    }

    /// Sets the number of results per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

/// Similarity query result: the store's parallel-array structure, unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
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

impl QueryResponse {
    /// Whether the response holds no matches at all.
    pub fn is_empty(&self) -> bool {
        self.ids.iter().all(|ids| ids.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builders() {
        let record = Record::new("r1")
            .with_document("hello")
            .with_field("source", serde_json::json!("test"))
            .with_embedding(vec![0.1, 0.2]);

        assert_eq!(record.id, "r1");
        assert_eq!(record.document.as_deref(), Some("hello"));
        assert_eq!(record.metadata.unwrap()["source"], "test");
        assert_eq!(record.embedding, Some(vec![0.1, 0.2]));
    }

    #[test]
    fn test_query_request_defaults() {
        let request = QueryRequest::new().with_text("hello");

        assert_eq!(request.top_k, 5);
        assert_eq!(request.query_texts, Some(vec!["hello".to_string()]));
        assert!(request.query_embeddings.is_none());
    }

    #[test]
    fn test_record_page_defaults() {
        let page = RecordPage::default();

        assert_eq!(page.limit, 50);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_empty_query_response() {
        assert!(QueryResponse::default().is_empty());

        let response = QueryResponse {
            ids: vec![vec!["a".into()]],
            ..Default::default()
        };
        assert!(!response.is_empty());
    }
}
