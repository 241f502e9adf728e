//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use blog_infra::database::{DEFAULT_COLLECTION, DatabaseConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub site_name: String,
    pub database: Option<DatabaseConfig>,
    /// Per-operation deadline for the post store.
    pub operation_timeout: Option<Duration>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Missing or unparseable
    /// values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let operation_timeout = lookup("DB_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let pool_size = |key: &str| lookup(key).and_then(|s| s.parse::<u32>().ok());

        let database = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections: pool_size("DB_MAX_CONNECTIONS").unwrap_or(10),
                min_connections: pool_size("DB_MIN_CONNECTIONS").unwrap_or(1),
                collection: lookup("DB_COLLECTION")
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
                operation_timeout,
            });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            site_name: lookup("SITE_NAME")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Blog".to_string()),
            database,
            operation_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = config_from(&[]);

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.site_name, "Blog");
        assert!(config.database.is_none());
        assert!(config.operation_timeout.is_none());
    }

    #[test]
    fn test_database_settings() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/blog_posts"),
            ("DB_COLLECTION", "posts_test"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_TIMEOUT_SECS", "5"),
        ]);

        let db = config.database.unwrap();
        assert_eq!(db.url, "postgres://localhost/blog_posts");
        assert_eq!(db.collection, "posts_test");
        assert_eq!(db.max_connections, 4);
        assert_eq!(db.min_connections, 1);
        assert_eq!(db.operation_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[
            ("PORT", "eighty"),
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("DB_MAX_CONNECTIONS", "lots"),
            ("DB_TIMEOUT_SECS", "0"),
        ]);

        assert_eq!(config.port, 8080);
        let db = config.database.unwrap();
        assert_eq!(db.max_connections, 10);
        assert_eq!(db.collection, "posts");
        assert!(db.operation_timeout.is_none());
    }

    #[test]
    fn test_oversized_pool_falls_back() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("DB_MAX_CONNECTIONS", "4294967297"),
            ("DB_MIN_CONNECTIONS", "-1"),
        ]);

        let db = config.database.unwrap();
        assert_eq!(db.max_connections, 10);
        assert_eq!(db.min_connections, 1);
    }
}
