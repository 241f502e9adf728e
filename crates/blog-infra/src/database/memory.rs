//! In-memory post backend - used as fallback when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{FieldAssignment, Post};
use blog_core::error::RepoError;
use blog_core::ports::PostBackend;

/// In-memory backend keeping posts in insertion order behind an async RwLock.
///
/// Like a document store without a unique index, it accepts duplicate ids;
/// lookups, updates and deletes act on the first match.
/// Note: Data is lost on process restart.
pub struct InMemoryPostBackend {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostBackend {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Start with the given posts already stored.
    pub fn seeded(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }

    /// Delete every post. Returns how many were removed.
    pub async fn truncate(&self) -> Result<u64, RepoError> {
        let mut posts = self.posts.write().await;
        let removed = posts.len() as u64;
        posts.clear();
        Ok(removed)
    }
}

impl Default for InMemoryPostBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostBackend for InMemoryPostBackend {
    async fn scan_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_one(&self, post: Post) -> Result<(), RepoError> {
        self.posts.write().await.push(post);
        Ok(())
    }

    async fn set_fields(&self, id: &str, fields: &FieldAssignment) -> Result<u64, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                fields.apply_to(post);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, id: &str) -> Result<u64, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.iter().position(|p| p.id == id) {
            Some(index) => {
                posts.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
