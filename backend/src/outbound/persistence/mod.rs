//! PostgreSQL adapters for the repository ports.
//!
//! Diesel row structs and table definitions stay private to this module;
//! the repositories translate rows into domain records and classify every
//! store failure into a [`RepositoryError`](crate::domain::ports::RepositoryError).
//!
//! ```ignore
//! use roster::outbound::persistence::{DbPool, DieselGroupRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/roster")).await?;
//! let groups = DieselGroupRepository::new(pool);
//! ```

mod diesel_group_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_group_repository::DieselGroupRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
