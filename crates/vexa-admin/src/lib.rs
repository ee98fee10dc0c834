#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod chroma;

mod backend;
mod config;
mod error;
mod facade;
mod record;

#[cfg(test)]
mod mock;

pub use backend::{Identity, RecordBatch, RecordSelector, StoreBackend};
pub use config::{ConnectionConfig, ConnectionConfigBuilder, DEFAULT_DATABASE, DEFAULT_TENANT};
pub use error::{AdminError, AdminResult};
pub use facade::VectorStoreFacade;
pub use record::{
    CollectionRef, Metadata, PLACEHOLDER_EMBEDDING, QueryRequest, QueryResponse, Record,
    RecordPage,
};

/// Tracing target for facade operations.
pub const TRACING_TARGET: &str = "vexa_admin";
