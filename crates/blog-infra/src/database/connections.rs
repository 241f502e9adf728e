use std::sync::Arc;
use std::time::Duration;

use blog_core::PostStore;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

#[cfg(feature = "postgres")]
use blog_core::error::RepoError;

#[cfg(feature = "postgres")]
use super::postgres_repo::PostgresPostBackend;

use super::memory::InMemoryPostBackend;

/// Default collection (table) name.
pub const DEFAULT_COLLECTION: &str = "posts";

/// Configuration for the post database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Collection holding the posts; one table per collection.
    pub collection: String,
    /// Deadline applied to every store operation. On Postgres it bounds pool
    /// acquisition and is enforced server-side as `statement_timeout`, so an
    /// expired statement is rolled back rather than abandoned.
    pub operation_timeout: Option<Duration>,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            collection: DEFAULT_COLLECTION.to_string(),
            operation_timeout: None,
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

/// Pool options for `config`, with the operation deadline applied.
#[cfg(feature = "postgres")]
pub fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let mut opts = ConnectOptions::new(&config.url);
    opts.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true);

    if let Some(limit) = config.operation_timeout {
        let millis = limit.as_millis().to_string();
        opts.acquire_timeout(limit).map_sqlx_postgres_opts(move |pg| {
            pg.options([("statement_timeout", millis.as_str())])
        });
    }

    opts
}

/// Open a pooled connection to the database.
#[cfg(feature = "postgres")]
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let conn = Database::connect(connect_options(config)).await?;
    tracing::info!("Database connected (pool: {})", config.max_connections);

    Ok(conn)
}

/// Connect, make sure the collection exists, and wrap it in a [`PostStore`].
///
/// The operation deadline is handed to the connection (see
/// [`connect_options`]), not to the store.
#[cfg(feature = "postgres")]
pub async fn open_postgres_store(config: &DatabaseConfig) -> Result<PostStore, RepoError> {
    let conn = connect(config)
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))?;

    let backend = PostgresPostBackend::new(conn, config.collection.clone());
    backend.ensure_collection().await?;
    tracing::info!(collection = backend.collection(), "Post store ready");

    Ok(PostStore::new(Arc::new(backend)))
}

/// A store over a fresh in-memory backend.
pub fn open_memory_store(operation_timeout: Option<Duration>) -> PostStore {
    with_timeout(
        PostStore::new(Arc::new(InMemoryPostBackend::new())),
        operation_timeout,
    )
}

fn with_timeout(store: PostStore, timeout: Option<Duration>) -> PostStore {
    match timeout {
        Some(limit) => store.with_timeout(limit),
        None => store,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = DatabaseConfig::new("postgres://localhost/blog").with_collection("posts_test");
        assert_eq!(config.collection, "posts_test");
        assert_eq!(config.max_connections, 10);
        assert!(config.operation_timeout.is_none());
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_deadline_bounds_pool_acquire() {
        let mut config = DatabaseConfig::new("postgres://localhost/blog");
        assert_eq!(connect_options(&config).get_acquire_timeout(), None);

        config.operation_timeout = Some(Duration::from_secs(5));
        let opts = connect_options(&config);
        assert_eq!(opts.get_acquire_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(opts.get_max_connections(), Some(10));
    }

    #[test]
    fn test_memory_store_carries_timeout() {
        let store = open_memory_store(Some(Duration::from_secs(3)));
        assert_eq!(store.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(open_memory_store(None).timeout(), None);
    }
}
