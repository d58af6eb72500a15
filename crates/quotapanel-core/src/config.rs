//! Configuration management for the quotapanel console

use crate::types::Role;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration
    pub api: ApiConfig,

    /// Dashboard view configuration
    pub dashboard: DashboardConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the panel backend
    pub base_url: String,

    /// Login username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Login password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Role the account holds on the backend
    pub role: Role,
}

/// Dashboard view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Users shown per page
    pub page_size: usize,

    /// System info poll interval in seconds (superadmin only)
    pub system_poll_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,

    /// Log format (json or text)
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_page_size() -> usize {
    5
}

const fn default_system_poll_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            password: None,
            role: Role::Admin,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            system_poll_secs: default_system_poll_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            dashboard: DashboardConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// Double-underscore section separator so snake_case keys survive, e.g.
// QUOTAPANEL_API__BASE_URL maps to api.base_url.
fn env_source() -> config::Environment {
    config::Environment::with_prefix("QUOTAPANEL")
        .separator("__")
        .try_parsing(true)
}

impl Config {
    /// Load configuration from environment and files
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(env_source())
            .build()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })?;

        config
            .try_deserialize()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!(config.api.username.is_none());
        assert!(config.api.password.is_none());
        assert_eq!(config.api.role, Role::Admin);

        assert_eq!(config.dashboard.page_size, 5);
        assert_eq!(config.dashboard.system_poll_secs, 5);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "api": {"base_url": "https://panel.example.com", "role": "superadmin"},
            "dashboard": {"page_size": 10}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.api.base_url, "https://panel.example.com");
        assert_eq!(config.api.role, Role::Superadmin);
        assert_eq!(config.dashboard.page_size, 10);
        assert_eq!(config.dashboard.system_poll_secs, 5); // Uses default
        assert_eq!(config.logging.level, "info"); // Uses default
    }

    #[test]
    fn test_empty_config_deserialization() {
        let config: Config = serde_json::from_str("{}").unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.dashboard.page_size, 5);
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let mut config = Config::default();
        config.api.username = Some("root".to_string());
        config.api.role = Role::Superadmin;

        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.api.username.as_deref(), Some("root"));
        assert_eq!(deserialized.api.role, Role::Superadmin);
        // password absent, not serialized as null
        assert!(!serialized.contains("password"));
    }

    #[test]
    fn test_env_overrides_snake_case_keys() {
        let vars = config::Map::from([
            (
                "QUOTAPANEL_API__BASE_URL".to_string(),
                "https://env.example.com".to_string(),
            ),
            (
                "QUOTAPANEL_DASHBOARD__PAGE_SIZE".to_string(),
                "10".to_string(),
            ),
            (
                "QUOTAPANEL_DASHBOARD__SYSTEM_POLL_SECS".to_string(),
                "30".to_string(),
            ),
        ]);

        let config: Config = config::Config::builder()
            .add_source(env_source().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.api.base_url, "https://env.example.com");
        assert_eq!(config.dashboard.page_size, 10);
        assert_eq!(config.dashboard.system_poll_secs, 30);
        assert_eq!(config.logging.level, "info"); // Uses default
    }

    #[test]
    fn test_default_value_functions() {
        assert_eq!(default_base_url(), "http://localhost:8000");
        assert_eq!(default_page_size(), 5);
        assert_eq!(default_system_poll_secs(), 5);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_log_format(), "json");
    }
}
