//! Application state - shared across all handlers.

use blog_core::PostStore;
use blog_infra::open_memory_store;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostStore,
    pub site_name: String,
    /// Which backend the store runs on, for the health endpoint.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let (posts, storage) = {
            if let Some(db_config) = &config.database {
                match blog_infra::open_postgres_store(db_config).await {
                    Ok(store) => {
                        tracing::info!(collection = %db_config.collection, "Using PostgreSQL post store");
                        (store, "postgres")
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (open_memory_store(config.operation_timeout), "memory")
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (open_memory_store(config.operation_timeout), "memory")
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (posts, storage) = {
            tracing::info!("Running without postgres feature - using in-memory store");
            (open_memory_store(config.operation_timeout), "memory")
        };

        tracing::info!("Application state initialized");

        Self {
            posts,
            site_name: config.site_name.clone(),
            storage,
        }
    }

    /// State over an existing store.
    #[cfg(test)]
    pub fn with_store(posts: PostStore, site_name: impl Into<String>) -> Self {
        Self {
            posts,
            site_name: site_name.into(),
            storage: "memory",
        }
    }
}
