use async_trait::async_trait;

use crate::domain::{FieldAssignment, Post};
use crate::error::RepoError;

/// Document backend holding one flat collection of posts keyed by `id`.
///
/// Each call is a single round trip and must be atomic for the one document
/// it touches. Implementations do no validation; that happens in
/// [`PostStore`](crate::store::PostStore) before a backend is reached.
#[async_trait]
pub trait PostBackend: Send + Sync {
    /// Every post in the collection, in whatever order the backend keeps them.
    async fn scan_all(&self) -> Result<Vec<Post>, RepoError>;

    /// The post whose id matches exactly, if any.
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError>;

    /// Insert one post as-is.
    async fn insert_one(&self, post: Post) -> Result<(), RepoError>;

    /// Write the assigned fields onto the post matching `id`.
    ///
    /// Returns the number of matched posts; zero is not an error.
    async fn set_fields(&self, id: &str, fields: &FieldAssignment) -> Result<u64, RepoError>;

    /// Remove the post matching `id`. Returns the number removed; zero is not
    /// an error.
    async fn delete_one(&self, id: &str) -> Result<u64, RepoError>;
}
