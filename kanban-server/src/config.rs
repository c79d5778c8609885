//! Configuration using Figment
//!
//! Sources are merged in precedence order (later sources override earlier ones):
//! 1. Default values
//! 2. `kanban.toml`, `kanban.yaml`, `kanban.yml` or `kanban.json` in the
//!    working directory, or the file passed with `--config`
//! 3. `PORT` (kept for existing deployments)
//! 4. `KANBAN_*` environment variables, e.g. `KANBAN_DATA_DIR`
//! 5. Command-line flags

use crate::error::{Result, ServerError};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use kanban_engine::DEFAULT_QUIET_PERIOD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, trace};

/// Config file names looked up in the working directory, lowest priority first
const CONFIG_FILE_NAMES: [&str; 4] = ["kanban.json", "kanban.yml", "kanban.yaml", "kanban.toml"];

/// Resolved settings for the server and the command-line client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface the server binds to
    pub host: String,
    /// Listening port; 0 picks a free one
    pub port: u16,
    /// Directory holding `state.json`
    pub data_dir: PathBuf,
    /// Directory of static files served at `/`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
    /// Server the command-line client talks to
    pub server_url: String,
    /// Local mirror used by the command-line client
    pub cache_path: PathBuf,
    /// Autosave quiet period in milliseconds
    pub autosave_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            data_dir: PathBuf::from("data"),
            static_dir: None,
            server_url: "http://127.0.0.1:3000".into(),
            cache_path: PathBuf::from("kanban_state.json"),
            autosave_ms: DEFAULT_QUIET_PERIOD.as_millis() as u64,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn autosave_period(&self) -> Duration {
        Duration::from_millis(self.autosave_ms)
    }
}

/// Command-line values that override every other source
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
}

/// Configuration provider using figment
///
/// No caching is performed; every `load` reads the sources again.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    working_dir: PathBuf,
    config_file: Option<PathBuf>,
}

impl ConfigProvider {
    /// Provider that discovers config files in the current directory
    pub fn new() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            config_file: None,
        }
    }

    /// Discover config files in `dir` instead of the current directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Use exactly this file instead of discovery
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    /// Load settings from every source
    pub fn load(&self) -> Result<ServerConfig> {
        self.load_with(&ConfigOverrides::default())
    }

    /// Load settings, letting `overrides` win over every other source
    pub fn load_with(&self, overrides: &ConfigOverrides) -> Result<ServerConfig> {
        let config: ServerConfig = self
            .build_figment()?
            .merge(Serialized::defaults(overrides))
            .extract()?;
        debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Build the figment with all sources in precedence order
    pub fn build_figment(&self) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(ServerConfig::default()));

        for path in self.config_files()? {
            trace!(path = %path.display(), "merging config file");
            figment = figment.merge(Self::file_provider(&path)?);
        }

        Ok(figment
            .merge(Env::raw().only(&["PORT"]))
            .merge(Env::prefixed("KANBAN_")))
    }

    fn config_files(&self) -> Result<Vec<PathBuf>> {
        if let Some(path) = &self.config_file {
            if !path.is_file() {
                return Err(ServerError::ConfigFile {
                    path: path.display().to_string(),
                    message: "not found".into(),
                });
            }
            return Ok(vec![path.clone()]);
        }

        Ok(CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.working_dir.join(name))
            .filter(|path| path.is_file())
            .collect())
    }

    fn file_provider(path: &Path) -> Result<Figment> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(Figment::from(Toml::file(path))),
            Some("yaml" | "yml") => Ok(Figment::from(Yaml::file(path))),
            Some("json") => Ok(Figment::from(Json::file(path))),
            _ => Err(ServerError::ConfigFile {
                path: path.display().to_string(),
                message: "expected a .toml, .yaml, .yml or .json file".into(),
            }),
        }
    }
}

impl Default for ConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}
