use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub holidays: HolidaysConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Bearer token required on mutating requests. Unset means open access.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HolidaysConfig {
    pub base_url: String,
    pub country_code: String,
    pub timeout_seconds: u64,
    pub offline_mode: bool,
    pub max_years_per_request: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_output: bool,
    pub directory: PathBuf,
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join("calendar-clone")
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl HolidaysConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            api_token: None,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: app_dir(dirs::data_dir()).join("events.db"),
        }
    }
}

impl Default for HolidaysConfig {
    fn default() -> Self {
        Self {
            base_url: "https://date.nager.at/api/v3".to_string(),
            country_code: "IN".to_string(),
            timeout_seconds: 10,
            offline_mode: false,
            max_years_per_request: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_output: false,
            directory: app_dir(dirs::config_dir()),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        Self::load_or_create_at(&Self::config_path())
    }

    /// Reads the config at `path`, writing the defaults there first if the
    /// file does not exist yet.
    pub fn load_or_create_at(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn config_path() -> PathBuf {
        app_dir(dirs::config_dir()).join("config.toml")
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_targets_indian_holidays() {
        let config = Config::default();
        assert_eq!(config.holidays.country_code, "IN");
        assert_eq!(config.holidays.base_url, "https://date.nager.at/api/v3");
    }

    #[test]
    fn default_holiday_timeout_is_10_seconds() {
        let config = Config::default();
        assert_eq!(config.holidays.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn default_server_has_no_token() {
        let config = Config::default();
        assert!(config.server.api_token.is_none());
        assert_eq!(config.server.bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            api_token = "s3cret"
            cors_origins = ["http://localhost:3000"]

            [database]
            path = "/tmp/events.db"

            [holidays]
            base_url = "http://localhost:8080"
            country_code = "DE"
            timeout_seconds = 3
            offline_mode = true
            max_years_per_request = 2

            [logging]
            level = "debug"
            file_output = true
            directory = "/tmp/logs"
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.server.api_token.as_deref(), Some("s3cret"));
        assert_eq!(config.database.path, PathBuf::from("/tmp/events.db"));
        assert_eq!(config.holidays.country_code, "DE");
        assert!(config.holidays.offline_mode);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config = Config::from_toml("[server]\nport = 8123\n").unwrap();

        assert_eq!(config.server.port, 8123);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.holidays, HolidaysConfig::default());
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let result = Config::from_toml("this is not valid toml");
        assert!(result.is_err());
    }

    #[test]
    fn load_or_create_writes_defaults_then_reads_them_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("calendar-clone").join("config.toml");

        let created = Config::load_or_create_at(&path).unwrap();
        assert!(path.exists());

        let loaded = Config::load_or_create_at(&path).unwrap();
        assert_eq!(created, loaded);
    }
}
