//! Typed API operations and payloads.
//!
//! Each submodule covers one endpoint group of the store's v2 REST surface
//! and implements its calls as methods on [`crate::ChromaClient`].

mod collection;
mod database;
mod record;
mod tenant;

pub use collection::Collection;
pub use record::{
    Metadata, QueryRecordsRequest, QueryRecordsResponse, RecordPayload, RecordsResponse,
};
pub use tenant::Identity;
