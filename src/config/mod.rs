use crate::error::{Error, Result};
use crate::matcher::{MatchField, RankOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
    pub api_rate_limit: u64,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub field: MatchField,
    pub min_match_count: usize,
}

impl MatchingConfig {
    pub fn rank_options(&self) -> RankOptions {
        RankOptions {
            field: self.field,
            min_matches: self.min_match_count,
        }
    }
}

/// Read an environment variable, falling back to `default`, and parse it.
fn env_or<T: std::str::FromStr>(name: &str, default: &str) -> Result<T> {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {name} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/recipes.db".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env_or("PORT", "5050")?;
        let external_url = std::env::var("EXTERNAL_URL").ok();
        let api_rate_limit = env_or("API_RATE_LIMIT", "100")?;
        let max_request_body_size = env_or("MAX_REQUEST_BODY_SIZE", "1048576")?;

        let max_connections = env_or("DATABASE_MAX_CONNECTIONS", "10")?;
        let min_connections = env_or("DATABASE_MIN_CONNECTIONS", "1")?;
        let connection_timeout_seconds = env_or("DATABASE_CONNECTION_TIMEOUT", "30")?;
        let idle_timeout_seconds = env_or("DATABASE_IDLE_TIMEOUT", "600")?;

        let field = std::env::var("MATCH_FIELD")
            .unwrap_or_else(|_| "pantry".to_string())
            .parse::<MatchField>()
            .map_err(Error::Config)?;
        let min_match_count = env_or("MIN_MATCH_COUNT", "1")?;

        Ok(Settings {
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                min_connections,
                connection_timeout_seconds,
                idle_timeout_seconds,
            },
            server: ServerConfig {
                host,
                port,
                external_url,
                api_rate_limit,
                max_request_body_size,
            },
            matching: MatchingConfig {
                field,
                min_match_count,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        if self.matching.min_match_count == 0 {
            return Err(Error::Config(
                "Minimum match count must be at least 1".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(Error::Config(
                "DATABASE_MIN_CONNECTIONS exceeds DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL for clients talking to this server
    pub fn server_url(&self) -> String {
        self.server.external_url.clone().unwrap_or_else(|| {
            let host = match self.server.host.as_str() {
                "0.0.0.0" => "127.0.0.1",
                host => host,
            };
            format!("http://{}:{}", host, self.server.port)
        })
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    Settings {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
            min_connections: 1,
            connection_timeout_seconds: 30,
            idle_timeout_seconds: 600,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5050,
            external_url: None,
            api_rate_limit: 100,
            max_request_body_size: 1048576,
        },
        matching: MatchingConfig {
            field: MatchField::Pantry,
            min_match_count: 1,
        },
    }
}
