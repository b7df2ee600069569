use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ayush_ingest::TableFiles;
use ayush_map::SchemaPolicy;
use ayush_model::{DEFAULT_THRESHOLD, DEFAULT_TOP_K, ResolveOptions};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

pub const DATA_DIR_ENV: &str = "AYUSH_DATA_DIR";
pub const PORT_ENV: &str = "AYUSH_PORT";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the source tables
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Table file names inside `data_dir`
    #[serde(default)]
    pub tables: TableFiles,

    /// JSON file for users and saved lookups; in memory when unset
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    #[serde(default)]
    pub schema_policy: SchemaPolicy,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fuzzy suggestion cap used when a request leaves it out
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Fuzzy score threshold used when a request leaves it out
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            data_dir: default_data_dir(),
            tables: TableFiles::default(),
            history_file: None,
            schema_policy: SchemaPolicy::default(),
            enable_cors: default_true(),
            timeout_secs: default_timeout_secs(),
            default_top_k: default_top_k(),
            default_threshold: default_threshold(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional TOML file, then apply environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> ServerResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ServerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            ServerError::Config(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_toml(&content)
            .map_err(|err| ServerError::Config(format!("{}: {err}", path.display())))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply `AYUSH_DATA_DIR` and `AYUSH_PORT` as returned by `var`.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> ServerResult<()> {
        if let Some(dir) = var(DATA_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(port) = var(PORT_ENV) {
            self.port = port.trim().parse().map_err(|err| {
                ServerError::Config(format!("{PORT_ENV}='{port}' is not a port: {err}"))
            })?;
        }
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Fuzzy options for a request, falling back to the configured defaults.
    pub fn resolve_options(&self, top_k: Option<usize>, threshold: Option<f64>) -> ResolveOptions {
        ResolveOptions::new(
            top_k.unwrap_or(self.default_top_k),
            threshold.unwrap_or(self.default_threshold),
        )
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}
