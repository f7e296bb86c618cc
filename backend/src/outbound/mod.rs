//! Outbound adapters implementing the repository ports.
//!
//! - **persistence**: PostgreSQL via Diesel, the production store.
//! - **memory**: a process-local store with the same constraint semantics,
//!   used when no database is configured and as a deterministic test double.
//!
//! Adapters only translate between store representations and domain types
//! and classify failures into [`RepositoryError`](crate::domain::ports::RepositoryError).

pub mod memory;
mod messages;
pub mod persistence;
