//! Persistent redirect storage backed by an embedded fjall keyspace.
//!
//! A [`UrlStore`] owns the keyspace handle for the process lifetime. Redirects
//! live in a single bucket (a fjall partition) named [`BUCKET_NAME`], keyed by
//! request path with the target URL as value.

pub mod error;
pub mod store;

pub use error::{Result, StorageError};
pub use store::{StoreConfig, UrlStore, BUCKET_NAME, DEFAULT_STORE_PATH};
