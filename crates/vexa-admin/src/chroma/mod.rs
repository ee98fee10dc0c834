//! Chroma-backed store implementation.

mod backend;

pub use backend::ChromaBackend;
