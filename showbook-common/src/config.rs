//! Configuration loading
//!
//! Each setting is resolved independently, highest priority first:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! A missing config file is normal. A malformed one is logged and ignored so
//! that the service still starts on defaults.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{Error, Result};

pub const ENV_DATABASE: &str = "SHOWBOOK_DATABASE";
pub const ENV_BIND: &str = "SHOWBOOK_BIND";
pub const ENV_PORT: &str = "SHOWBOOK_PORT";
pub const ENV_LOG: &str = "SHOWBOOK_LOG";

/// Compiled defaults used when nothing else is configured
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub database_path: PathBuf,
    pub bind_address: IpAddr,
    pub port: u16,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        let data_dir = dirs::data_local_dir()
            .map(|d| d.join("showbook"))
            .unwrap_or_else(|| PathBuf::from("./showbook_data"));

        Self {
            database_path: data_dir.join("showbook.db"),
            bind_address: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
            log_level: "info".to_string(),
        }
    }
}

/// On-disk TOML configuration; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub bind_address: Option<IpAddr>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database_path: Option<PathBuf>,
    pub bind_address: Option<IpAddr>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Fully resolved service settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_path: PathBuf,
    pub bind_address: IpAddr,
    pub port: u16,
    pub log_level: String,
}

impl Settings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

/// Default config file location: `<config_dir>/showbook/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("showbook").join("config.toml"))
}

/// Resolves [`Settings`] from CLI, environment, TOML and defaults
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    config_file: Option<PathBuf>,
    defaults: CompiledDefaults,
}

impl ConfigResolver {
    /// `config_file` overrides the default config file location
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self {
            config_file: config_file.or_else(default_config_path),
            defaults: CompiledDefaults::for_current_platform(),
        }
    }

    pub fn with_defaults(mut self, defaults: CompiledDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    fn load_toml(&self) -> TomlConfig {
        let Some(path) = self.config_file.as_deref() else {
            return TomlConfig::default();
        };

        if !path.exists() {
            debug!("No config file at {}", path.display());
            return TomlConfig::default();
        }

        match TomlConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                TomlConfig::default()
            }
        }
    }

    pub fn resolve(&self, cli: CliOverrides) -> Settings {
        let file = self.load_toml();

        let database_path = cli
            .database_path
            .or_else(|| env_var(ENV_DATABASE).map(PathBuf::from))
            .or(file.database_path)
            .unwrap_or_else(|| self.defaults.database_path.clone());

        let bind_address = cli
            .bind_address
            .or_else(|| env_parsed(ENV_BIND))
            .or(file.bind_address)
            .unwrap_or(self.defaults.bind_address);

        let port = cli
            .port
            .or_else(|| env_parsed(ENV_PORT))
            .or(file.port)
            .unwrap_or(self.defaults.port);

        let log_level = cli
            .log_level
            .or_else(|| env_var(ENV_LOG))
            .or(file.log_level)
            .unwrap_or_else(|| self.defaults.log_level.clone());

        Settings {
            database_path,
            bind_address,
            port,
            log_level,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env_var(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_defaults() {
        let defaults = CompiledDefaults::for_current_platform();
        assert_eq!(defaults.port, 5000);
        assert_eq!(defaults.log_level, "info");
        assert!(defaults.database_path.ends_with("showbook.db"));
    }

    #[test]
    fn test_toml_partial_keys() {
        let config = TomlConfig::parse("port = 8080\n").unwrap();
        assert_eq!(config.port, Some(8080));
        assert!(config.database_path.is_none());
        assert!(config.bind_address.is_none());
    }

    #[test]
    fn test_toml_rejects_wrong_type() {
        assert!(matches!(
            TomlConfig::parse("port = \"eighty\"\n"),
            Err(Error::Config(_))
        ));
    }
}
