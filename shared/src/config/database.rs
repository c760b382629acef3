//! Database configuration module

use serde::{Deserialize, Serialize};

use super::parse_or;

/// Database configuration for MySQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL; `None` selects the in-memory stores
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    pub connect_timeout: u64,

    /// Deadline for a single store call in milliseconds
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Deadline for the health ping in milliseconds
    #[serde(default = "default_health_check_timeout_ms")]
    pub health_check_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connect_timeout: 30,
            query_timeout_ms: default_query_timeout_ms(),
            health_check_timeout_ms: default_health_check_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_source(&|key| std::env::var(key).ok())
    }

    pub(crate) fn from_source<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            max_connections: parse_or(lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections),
            connect_timeout: parse_or(lookup, "DATABASE_CONNECT_TIMEOUT", defaults.connect_timeout),
            query_timeout_ms: parse_or(lookup, "DATABASE_QUERY_TIMEOUT_MS", defaults.query_timeout_ms),
            health_check_timeout_ms: parse_or(
                lookup,
                "DATABASE_HEALTH_TIMEOUT_MS",
                defaults.health_check_timeout_ms,
            ),
        }
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn query_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.query_timeout_ms)
    }

    pub fn health_check_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.health_check_timeout_ms)
    }
}

fn default_query_timeout_ms() -> u64 {
    3000
}

fn default_health_check_timeout_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_url_means_no_database() {
        let lookup = |key: &str| (key == "DATABASE_URL").then(|| "  ".to_string());
        assert!(DatabaseConfig::from_source(&lookup).url.is_none());
    }

    #[test]
    fn test_timeouts() {
        let config = DatabaseConfig::new("mysql://localhost/auth").with_max_connections(4);
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.query_timeout().as_millis(), 3000);
        assert_eq!(config.health_check_timeout().as_secs(), 1);
    }
}
