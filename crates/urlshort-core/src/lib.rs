//! Core types for the urlshort redirector.
//!
//! This crate provides the records parsed from mapping documents, the
//! immutable [`Mapping`] table built from them, and the shared error type.
//! It performs no I/O.

pub mod error;
pub mod mapping;
pub mod record;

pub use error::{CoreError, Result};
pub use mapping::Mapping;
pub use record::{parse, Record, RecordFormat};
