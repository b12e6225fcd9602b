//! Configuration loading and root folder resolution
//!
//! The root folder holds the SQLite database and an optional `daisy.toml`
//! with service settings. Missing or unreadable configuration never stops
//! startup: every setting has a compiled default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::recency::OrderingStrategy;
use crate::{Error, Result};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "DAISY_ROOT_FOLDER";

/// Service settings file name inside the root folder
pub const SERVICE_CONFIG_FILE: &str = "daisy.toml";

/// Root folder resolution with priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. `root_folder` key in the user/system TOML config file
/// 4. OS-dependent compiled default (fallback)
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
    env_var_name: String,
    config_file: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(cli_arg: Option<PathBuf>) -> Self {
        Self {
            cli_arg,
            env_var_name: ROOT_FOLDER_ENV.to_string(),
            config_file: find_config_file(),
        }
    }

    /// Read the override from a different environment variable
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var_name = name.into();
        self
    }

    /// Use a specific TOML file (or none) instead of the platform location
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(&self.env_var_name) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = self.config_file.as_deref().and_then(root_folder_from_file) {
            return path;
        }

        default_root_folder()
    }
}

/// `root_folder` value from a TOML config file, if present and readable
fn root_folder_from_file(config_path: &Path) -> Option<PathBuf> {
    let content = std::fs::read_to_string(config_path).ok()?;
    let config = toml::from_str::<toml::Value>(&content).ok()?;
    config
        .get("root_folder")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
}

/// Platform config file location, if one exists
fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("daisy").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/daisy/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/daisy (or /var/lib/daisy for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("daisy"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/daisy"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("daisy"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/daisy"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("daisy"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\daisy"))
    } else {
        PathBuf::from("./daisy_data")
    }
}

/// Create the root folder if it does not exist
pub fn ensure_root_folder(root_folder: &Path) -> Result<()> {
    if !root_folder.exists() {
        std::fs::create_dir_all(root_folder)?;
        info!("Created root folder: {}", root_folder.display());
    }
    Ok(())
}

/// Settings for the report service, read from `daisy.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub port: u16,
    /// Default tracing level when `RUST_LOG` is unset
    pub log_level: String,
    /// Database file name, relative to the root folder
    pub database_file: String,
    /// Key strategy chain for post card ordering
    pub ordering: OrderingStrategy,
    pub poll: PollConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 5730,
            log_level: "info".to_string(),
            database_file: "daisy.db".to_string(),
            ordering: OrderingStrategy::default(),
            poll: PollConfig::default(),
        }
    }
}

/// Status polling cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Delay between successful polls
    pub interval_ms: u64,
    /// Delay after the first failed poll; doubles per consecutive failure
    pub error_delay_ms: u64,
    /// Ceiling for the error delay
    pub max_error_delay_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            error_delay_ms: 5000,
            max_error_delay_ms: 60_000,
        }
    }
}

impl ServiceConfig {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ServiceConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `daisy.toml` from the root folder
    ///
    /// `Ok(None)` when the file does not exist. Nothing is logged: binaries
    /// call this before the tracing subscriber is installed, since the file
    /// decides the log level, and report the outcome afterwards.
    pub fn try_load(root_folder: &Path) -> Result<Option<Self>> {
        let path = root_folder.join(SERVICE_CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content).map(Some)
    }

    fn validate(&self) -> Result<()> {
        if self.database_file.trim().is_empty() {
            return Err(Error::Config("database_file must not be empty".to_string()));
        }
        if self.poll.interval_ms == 0 || self.poll.error_delay_ms == 0 {
            return Err(Error::Config("poll delays must be positive".to_string()));
        }
        if self.poll.max_error_delay_ms < self.poll.error_delay_ms {
            return Err(Error::Config(
                "poll.max_error_delay_ms must be at least poll.error_delay_ms".to_string(),
            ));
        }
        Ok(())
    }

    /// Full database path under the root folder
    pub fn database_path(&self, root_folder: &Path) -> PathBuf {
        root_folder.join(&self.database_file)
    }

    /// `host:port` for the listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
