//! Redirect resolution as a chain of responsibility.
//!
//! Every layer is a [`Handler`]: it either answers a request itself or hands
//! it, unchanged, to the fallback it was built with. A [`Resolver`] is the
//! handler shape shared by all mapping sources; it consults its
//! [`RedirectSource`] and replies `301 Moved Permanently` on a hit.
//!
//! # Example
//!
//! ```rust
//! use urlshort_core::{Mapping, RecordFormat};
//! use urlshort_redirector::{Chain, DefaultHandler};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let table: Mapping = [("/docs", "https://docs.rs/")].into_iter().collect();
//! let yaml = Mapping::from_document(
//!     b"- path: /src\n  url: https://github.com/\n",
//!     RecordFormat::Yaml,
//! )?;
//!
//! // `yaml` is consulted first, then `table`, then the default handler.
//! let root = Chain::new(DefaultHandler)
//!     .wrap(table)
//!     .wrap(yaml)
//!     .into_handler();
//! # let _ = root;
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod default;
pub mod error;
pub mod handler;
pub mod resolver;
pub mod source;

pub use chain::Chain;
pub use default::DefaultHandler;
pub use error::{RedirectorError, Result};
pub use handler::{Handler, SharedHandler};
pub use resolver::{MapResolver, Resolver, StoreResolver};
pub use source::RedirectSource;
