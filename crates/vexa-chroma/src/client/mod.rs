//! Store client module
//!
//! This module provides the main client interface for Chroma-style vector
//! store APIs. It handles authentication, request construction, and response
//! processing; the per-endpoint operations live in [`crate::api`].

mod chroma_client;
mod chroma_config;
mod credentials;

pub use chroma_client::ChromaClient;
pub(crate) use chroma_client::API_PREFIX;
pub use chroma_config::{ChromaBuilder, ChromaConfig};
pub use credentials::ChromaCredentials;
