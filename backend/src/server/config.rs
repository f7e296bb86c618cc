//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use roster::outbound::persistence::DbPool;

const CLIENT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const KEEP_ALIVE: Duration = Duration::from_secs(120);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) client_request_timeout: Duration,
    pub(crate) keep_alive: Duration,
    pub(crate) shutdown_timeout: Duration,
}

impl ServerConfig {
    /// Configuration serving from the in-memory store with default timeouts.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            client_request_timeout: CLIENT_REQUEST_TIMEOUT,
            keep_alive: KEEP_ALIVE,
            shutdown_timeout: SHUTDOWN_TIMEOUT,
        }
    }

    /// Attach a database connection pool; the Diesel repositories are used
    /// instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
