//! Application configuration: listen address and inference connection.

use derive_getters::Getters;
use reelsmith_error::ConfigError;
use reelsmith_models::InferenceConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Address the HTTP server binds to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ListenConfig {
    /// Interface to bind
    host: String,
    /// TCP port
    port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ListenConfig {
    /// Create a listen address.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port` string accepted by `TcpListener::bind`.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Top-level configuration.
///
/// ```toml
/// [server]
/// host = "127.0.0.1"
/// port = 8000
///
/// [inference]
/// base_url = "http://localhost:11434"
/// model = "llama3"
/// timeout_secs = 180
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listen address
    server: ListenConfig,
    /// Inference server connection
    inference: InferenceConfig,
}

impl AppConfig {
    /// Build a config from its parts.
    pub fn new(server: ListenConfig, inference: InferenceConfig) -> Self {
        Self { server, inference }
    }

    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Invalid config: {}", e)))
    }

    /// Load configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded config file");
        Ok(config)
    }

    /// Load from an optional file, then apply process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup such as the process environment.
    ///
    /// Reads `REELSMITH_HOST` and `REELSMITH_PORT`, then the inference
    /// variables handled by [`InferenceConfig::apply_overrides`]. Blank values
    /// are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = get("REELSMITH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("REELSMITH_PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                ConfigError::new(format!("REELSMITH_PORT must be a valid port, got '{}'", port))
            })?;
        }
        self.inference.apply_overrides(&lookup)
    }

    /// Replace the listen host.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.server.host = host.into();
    }

    /// Replace the listen port.
    pub fn set_port(&mut self, port: u16) {
        self.server.port = port;
    }
}
