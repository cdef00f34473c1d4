use urlshort_redirector::SharedHandler;

#[derive(Clone)]
pub struct AppState {
    root: SharedHandler,
}

impl AppState {
    pub fn new(root: SharedHandler) -> Self {
        Self { root }
    }

    /// The outermost handler of the resolver chain.
    pub fn root(&self) -> &SharedHandler {
        &self.root
    }
}
