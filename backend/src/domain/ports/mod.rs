//! Repository ports for the hexagonal boundary.
//!
//! Inbound adapters depend only on these traits; outbound adapters (Diesel,
//! in-memory) implement them. Every operation reports failures through the
//! shared [`RepositoryError`] taxonomy.

mod macros;
pub(crate) use macros::define_port_error;

mod group_repository;
mod repository_error;
mod user_repository;

#[cfg(test)]
pub use group_repository::MockGroupRepository;
pub use group_repository::GroupRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
