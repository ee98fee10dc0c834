#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod api;
mod client;
mod error;

pub use crate::client::{ChromaBuilder, ChromaClient, ChromaConfig, ChromaCredentials};
pub use crate::error::{Error, Result};

/// Tracing target for the main library
pub const TRACING_TARGET: &str = "vexa_chroma";

/// Tracing target for client operations
pub const TRACING_TARGET_CLIENT: &str = "vexa_chroma::client";

/// Tracing target for API operations
pub const TRACING_TARGET_API: &str = "vexa_chroma::api";
