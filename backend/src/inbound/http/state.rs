//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see the
//! repository ports, so they can be exercised against mocks or the
//! in-memory store without I/O.

use std::sync::Arc;

use crate::domain::ports::{GroupRepository, UserRepository};

/// Repository handles injected into every handler.
#[derive(Clone)]
pub struct HttpState {
    pub groups: Arc<dyn GroupRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    pub fn new(groups: Arc<dyn GroupRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { groups, users }
    }

    /// Serve both resources from one store implementing both ports.
    ///
    /// ```
    /// use roster::inbound::http::state::HttpState;
    /// use roster::outbound::memory::InMemoryStore;
    ///
    /// let state = HttpState::from_store(InMemoryStore::new());
    /// # let _ = state;
    /// ```
    pub fn from_store<S>(store: S) -> Self
    where
        S: GroupRepository + UserRepository + 'static,
    {
        let store = Arc::new(store);
        Self {
            groups: store.clone(),
            users: store,
        }
    }
}
