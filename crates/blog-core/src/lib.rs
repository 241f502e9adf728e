//! # Blog Core
//!
//! The domain layer of the blog post store.
//! Validation, sparse merge-updates and the store surface live here; storage
//! backends are plugged in through [`ports::PostBackend`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod store;

pub use error::{DomainError, ErrorKind, RepoError};
pub use store::PostStore;
