use crate::handler::{Handler, SharedHandler};
use crate::resolver::Resolver;
use crate::source::RedirectSource;
use std::sync::Arc;

/// Builds a chain of resolvers from the inside out.
///
/// The chain starts at a terminal handler. Each call to [`Chain::wrap`] puts a
/// new resolver in front of everything built so far, so the source wrapped
/// last is consulted first and wins on overlapping paths.
///
/// ```rust
/// use urlshort_core::Mapping;
/// use urlshort_redirector::{Chain, DefaultHandler};
///
/// let inner: Mapping = [("/k", "https://inner/")].into_iter().collect();
/// let outer: Mapping = [("/k", "https://outer/")].into_iter().collect();
///
/// // outer(fallback = inner(fallback = DefaultHandler))
/// let root = Chain::new(DefaultHandler).wrap(inner).wrap(outer).into_handler();
/// # let _ = root;
/// ```
#[derive(Clone)]
pub struct Chain {
    head: SharedHandler,
    depth: usize,
}

impl Chain {
    /// Starts a chain that ends at `terminal`.
    pub fn new(terminal: impl Handler) -> Self {
        Self::from_shared(Arc::new(terminal))
    }

    /// Starts a chain that ends at an already shared handler.
    pub fn from_shared(terminal: SharedHandler) -> Self {
        Self {
            head: terminal,
            depth: 0,
        }
    }

    /// Puts a resolver over `source` in front of the current chain.
    pub fn wrap<S: RedirectSource>(self, source: S) -> Self {
        let resolver = Resolver::new(source, self.head);
        Self {
            head: Arc::new(resolver),
            depth: self.depth + 1,
        }
    }

    /// Number of resolvers in front of the terminal handler.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the outermost handler, the one to register with the listener.
    pub fn into_handler(self) -> SharedHandler {
        self.head
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain").field("depth", &self.depth).finish()
    }
}
