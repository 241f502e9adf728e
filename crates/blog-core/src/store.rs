//! Post store - the CRUD surface handed to HTTP handlers and test harnesses.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Post, compute_update_set, validate_for_create};
use crate::error::{DomainError, RepoError};
use crate::ports::PostBackend;

/// CRUD operations over a [`PostBackend`], with validation and sparse merging.
///
/// Holds no cache and no lock. Consistency between concurrent callers is
/// whatever the backend gives for a single-document write; the last write
/// wins. Failures are returned immediately and never retried.
#[derive(Clone)]
pub struct PostStore {
    backend: Arc<dyn PostBackend>,
    timeout: Option<Duration>,
}

impl PostStore {
    pub fn new(backend: Arc<dyn PostBackend>) -> Self {
        Self {
            backend,
            timeout: None,
        }
    }

    /// Bound every backend call by `timeout`. An expired call surfaces as a
    /// backend error.
    ///
    /// The deadline is enforced here by abandoning the backend future, so a
    /// write the backend had already applied stays applied even though the
    /// call reports a timeout. Backends that can enforce a deadline
    /// themselves (Postgres `statement_timeout`) should be given it there
    /// instead.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Every stored post, in backend order. Empty collections give an empty vec.
    pub async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        self.call(self.backend.scan_all())
            .await
            .map_err(|e| DomainError::backend("list_all", None, e))
    }

    /// Look up exactly one post.
    pub async fn get_by_id(&self, id: &str) -> Result<Post, DomainError> {
        self.call(self.backend.find_by_id(id))
            .await
            .map_err(|e| DomainError::backend("get_by_id", Some(id), e))?
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "post",
                id: id.to_string(),
            })
    }

    /// Validate, default the timestamp, and insert.
    ///
    /// Does not check for an existing post with the same id; callers that
    /// need uniqueness look it up with [`get_by_id`](Self::get_by_id) first.
    /// Returns the post as stored.
    pub async fn create(&self, post: &Post) -> Result<Post, DomainError> {
        let prepared = validate_for_create(post)?;

        tracing::debug!(post_id = %prepared.id, "Creating post");
        self.call(self.backend.insert_one(prepared.clone()))
            .await
            .map_err(|e| DomainError::backend("create", Some(&prepared.id), e))?;

        Ok(prepared)
    }

    /// Sparse merge-update of the post keyed by `post.id`.
    ///
    /// Only non-empty payload fields are written. The timestamp is refreshed
    /// to now unless the payload carries one. Updating an id that does not
    /// exist is a successful no-op.
    pub async fn update(&self, post: &Post) -> Result<(), DomainError> {
        let prepared = validate_for_create(post)?;
        let fields = compute_update_set(&prepared);

        let matched = self
            .call(self.backend.set_fields(&prepared.id, &fields))
            .await
            .map_err(|e| DomainError::backend("update", Some(&prepared.id), e))?;

        if matched == 0 {
            tracing::debug!(post_id = %prepared.id, "Update matched no post");
        } else {
            tracing::debug!(post_id = %prepared.id, fields = fields.len(), "Post updated");
        }

        Ok(())
    }

    /// Remove a post. Deleting an absent id succeeds.
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let removed = self
            .call(self.backend.delete_one(id))
            .await
            .map_err(|e| DomainError::backend("delete", Some(id), e))?;

        tracing::debug!(post_id = %id, removed, "Delete finished");
        Ok(())
    }

    async fn call<T, F>(&self, fut: F) -> Result<T, RepoError>
    where
        F: Future<Output = Result<T, RepoError>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| RepoError::Timeout(limit))?,
            None => fut.await,
        }
    }
}
