//! JSON-file-backed product store.
//!
//! The whole catalog lives in one pretty-printed JSON document that is read
//! fresh on every call and rewritten in full on every mutation.

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{ProductStore, StoreDocument, StoreStats, STORE_VERSION};
