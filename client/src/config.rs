//! Configuration management for the Candango ERP client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CANDANGO_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::Language;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Language for user-facing messages
    pub language: Language,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Dashboard configuration
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend REST API, including the /api prefix
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// How many recent sales the dashboard shows
    pub recent_sales: usize,

    /// How many recent stock movements the dashboard shows
    pub recent_movements: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CANDANGO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("language", "portuguese")?
            .set_default("api.base_url", "http://localhost:8000/api")?
            .set_default("api.timeout_seconds", 30)?
            .set_default("dashboard.recent_sales", 5)?
            .set_default("dashboard.recent_movements", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CANDANGO_ prefix)
            .add_source(
                Environment::with_prefix("CANDANGO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_sales: 5,
            recent_movements: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            language: Language::Portuguese,
            api: ApiConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.dashboard.recent_sales, 5);
        assert_eq!(config.language, Language::Portuguese);
    }
}
