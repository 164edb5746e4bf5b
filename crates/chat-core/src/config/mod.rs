//! Configuration management
//!
//! Settings come from, lowest precedence first: built-in defaults, an
//! optional TOML file, environment variables. The binary applies its own
//! command line flags on top.

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::storage::database::{DEFAULT_MAX_CONNECTIONS, default_database_path, parse_database_url};
use crate::storage::DatabaseConfig;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "CHAT_API_CONFIG";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Chat service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "chat-api".to_string(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?
            .join("chat-api"))
    }

    /// Get the default config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the file layer and the process environment
    ///
    /// An explicit `path` (or `$CHAT_API_CONFIG`) must exist; the default
    /// location is only read when present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match Self::config_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Config::default(),
            },
        };

        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file; missing sections fall back to defaults
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.path = parse_database_url(&url);
        }
        if let Some(max) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = max
                .trim()
                .parse()
                .with_context(|| format!("Invalid DATABASE_MAX_CONNECTIONS value: {}", max))?;
        }
        if let Some(host) = lookup("APP_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("APP_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid APP_PORT value: {}", port))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level.trim().to_lowercase();
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow!("server.port must be between 1 and 65535"));
        }
        if self.server.host.trim().is_empty() {
            return Err(anyhow!("server.host cannot be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(anyhow!("database.max_connections must be at least 1"));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(anyhow!("database.path cannot be empty"));
        }
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(anyhow!(
                "Invalid log level: {}. Valid options: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .with_context(|| format!("Invalid bind address: {}", addr))
    }

    /// Database settings in the form the storage layer takes
    pub fn database_config(&self) -> DatabaseConfig {
        let config = DatabaseConfig::with_path(&self.database.path);
        if config.is_in_memory() {
            DatabaseConfig::in_memory()
        } else {
            config.max_connections(self.database.max_connections)
        }
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "server.host" => Ok(self.server.host.clone()),
            "server.port" => Ok(self.server.port.to_string()),
            "database.path" => Ok(self.database.path.display().to_string()),
            "database.max_connections" => Ok(self.database.max_connections.to_string()),
            "logging.level" => Ok(self.logging.level.clone()),
            "service.name" => Ok(self.service.name.clone()),
            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `chat-api config` to see available keys.",
                key
            )),
        }
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = [
            "server.host",
            "server.port",
            "database.path",
            "database.max_connections",
            "logging.level",
            "service.name",
        ];

        keys.into_iter()
            .map(|key| Ok((key.to_string(), self.get(key)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.service.name, "chat-api");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 9090
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[database]\npath = \"/tmp/chats.db\"\nmax_connections = 3\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.database.path, PathBuf::from("/tmp/chats.db"));
        assert_eq!(config.database.max_connections, 3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::from_file(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(lookup_from(&[
                ("DATABASE_URL", "sqlite://data/chat.db"),
                ("APP_HOST", "127.0.0.1"),
                ("APP_PORT", "3000"),
                ("LOG_LEVEL", "DEBUG"),
                ("DATABASE_MAX_CONNECTIONS", "8"),
            ]))
            .unwrap();

        assert_eq!(config.database.path, PathBuf::from("data/chat.db"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.database.max_connections, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_invalid_port() {
        let mut config = Config::default();
        let result = config.apply_env(lookup_from(&[("APP_PORT", "eighty")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");

        config.server.host = "not a host".to_string();
        assert!(config.bind_addr().is_err());
    }

    #[test]
    fn test_database_config_in_memory() {
        let mut config = Config::default();
        config.database.path = PathBuf::from(":memory:");
        config.database.max_connections = 10;

        let db = config.database_config();
        assert!(db.is_in_memory());
        assert_eq!(db.max_connections, 1);
    }

    #[test]
    fn test_get_and_list() {
        let config = Config::default();
        assert_eq!(config.get("server.port").unwrap(), "8000");
        assert!(config.get("nope").is_err());

        let listed = config.list().unwrap();
        assert_eq!(listed.len(), 6);
        assert!(listed.iter().any(|(k, v)| k == "service.name" && v == "chat-api"));
    }
}
