//! Builders for the repository handles injected into handlers.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use roster::inbound::http::state::HttpState;
use roster::outbound::memory::InMemoryStore;
use roster::outbound::persistence::{DbPool, DieselGroupRepository, DieselUserRepository};

/// Diesel repositories when a pool is configured, otherwise one shared
/// in-memory store for both ports.
pub(super) fn build_http_state(db_pool: Option<&DbPool>) -> web::Data<HttpState> {
    let state = match db_pool {
        Some(pool) => HttpState::new(
            Arc::new(DieselGroupRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; serving from a process-local in-memory store");
            HttpState::from_store(InMemoryStore::new())
        }
    };
    web::Data::new(state)
}
