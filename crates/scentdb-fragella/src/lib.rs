//! Client and normalization layer for the third-party Fragella fragrance API.
//!
//! Only the offline seed job talks to Fragella. Raw records never leave this
//! crate: callers get [`scentdb_core::Product`] values from [`normalize`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{FragellaClient, RequestBudget};
pub use error::FragellaError;
pub use normalize::{normalize_batch, normalize_fragrance};
pub use types::{ExternalId, Flag, NamedEntry, RawFragrance};
