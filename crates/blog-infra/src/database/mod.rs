//! Post backends and connection management.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_repo;

pub use connections::{DEFAULT_COLLECTION, DatabaseConfig, open_memory_store};
pub use memory::InMemoryPostBackend;

#[cfg(feature = "postgres")]
pub use connections::{connect, open_postgres_store};
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostBackend;
