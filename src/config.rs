//! Application configuration loaded from environment variables.
//!
//! Read once at startup. A `.env` file in the working directory is honored
//! for local development.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Points submitted per database write call.
pub const DEFAULT_CHUNK_SIZE: usize = 80_000;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// InfluxDB host name
    pub influx_host: String,
    /// InfluxDB HTTP port
    pub influx_port: u16,
    /// Database points are written to (created at startup if absent)
    pub influx_database: String,
    pub influx_username: Option<String>,
    pub influx_password: Option<String>,
    /// Timeout applied to every request made to InfluxDB
    pub influx_timeout: Duration,
    /// Maximum number of points per write call
    pub chunk_size: usize,
    /// Largest request body accepted on `/collect`
    pub max_body_bytes: usize,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 5353,
            influx_host: "localhost".to_string(),
            influx_port: 8086,
            influx_database: "db".to_string(),
            influx_username: None,
            influx_password: None,
            influx_timeout: Duration::from_secs(60),
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_body_bytes: 512 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let config = Self {
            port: parse_var("PORT", defaults.port)?,
            influx_host: env::var("INFLUX_HOST").unwrap_or(defaults.influx_host),
            influx_port: parse_var("INFLUX_PORT", defaults.influx_port)?,
            influx_database: env::var("INFLUX_DATABASE").unwrap_or(defaults.influx_database),
            influx_username: env::var("INFLUX_USERNAME").ok(),
            influx_password: env::var("INFLUX_PASSWORD").ok(),
            influx_timeout: Duration::from_secs(parse_var(
                "INFLUX_TIMEOUT_SECS",
                defaults.influx_timeout.as_secs(),
            )?),
            chunk_size: parse_var("CHUNK_SIZE", defaults.chunk_size)?,
            max_body_bytes: parse_var("MAX_BODY_BYTES", defaults.max_body_bytes)?,
        };

        if config.chunk_size == 0 {
            return Err(ConfigError::Invalid {
                var: "CHUNK_SIZE",
                value: "0".to_string(),
            });
        }

        Ok(config)
    }

    /// Base URL of the InfluxDB HTTP API.
    pub fn influx_url(&self) -> String {
        format!("http://{}:{}", self.influx_host, self.influx_port)
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global, so everything touching them
    // lives in one test.
    #[test]
    fn test_config_from_env() {
        env::set_var("PORT", "6000");
        env::set_var("INFLUX_HOST", "influx.internal");
        env::set_var("CHUNK_SIZE", "500");
        env::remove_var("INFLUX_DATABASE");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 6000);
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.influx_database, "db");
        assert_eq!(config.influx_url(), "http://influx.internal:8086");

        env::set_var("CHUNK_SIZE", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { var: "CHUNK_SIZE", .. })
        ));

        env::set_var("CHUNK_SIZE", "lots");
        assert!(Config::from_env().is_err());

        env::remove_var("PORT");
        env::remove_var("INFLUX_HOST");
        env::remove_var("CHUNK_SIZE");
    }

    #[test]
    fn test_default_matches_collector_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 5353);
        assert_eq!(config.chunk_size, 80_000);
        assert_eq!(config.influx_url(), "http://localhost:8086");
    }
}
