use crate::cli::Args;
use crate::core::error::MmateError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_TYPING_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: Option<String>,
    pub typing_delay_ms: u64,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            typing_delay_ms: DEFAULT_TYPING_DELAY_MS,
            request_timeout_secs: None,
        }
    }
}

/// Effective values after command-line overrides are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    pub typing_delay: Duration,
    pub request_timeout: Option<Duration>,
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join(".mmate").join("config.yaml")
    }

    pub fn history_path() -> PathBuf {
        Self::config_dir().join(".mmate").join("input_history.txt")
    }

    pub fn load() -> Result<Config, MmateError> {
        Self::load_from(&Self::config_path())
    }

    /// Reads `path`, or writes a default config there when it is missing.
    pub fn load_from(path: &Path) -> Result<Config, MmateError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            if contents.trim().is_empty() {
                return Ok(Config::default());
            }
            let config = serde_yml::from_str::<Config>(&contents)
                .map_err(|e| MmateError::Config(format!("Parse {}: {}", path.display(), e)))?;
            debug!(path = %path.display(), "loaded config");
            return Ok(config);
        }

        let config = Config::default();
        if let Err(e) = config.save_to(path) {
            warn!(path = %path.display(), error = %e, "could not write default config");
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), MmateError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let yaml_content = serde_yml::to_string(self)?;
        fs::write(path, yaml_content)?;
        Ok(())
    }

    /// Command line (and `MMATE_BACKEND_URL`) wins over the file.
    pub fn merge(self, args: &Args) -> Settings {
        let backend_url = args
            .backend_url
            .clone()
            .or(self.backend_url)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let typing_delay_ms = args.typing_delay_ms.unwrap_or(self.typing_delay_ms);
        let timeout_secs = args.timeout_secs.or(self.request_timeout_secs);

        Settings {
            backend_url,
            typing_delay: Duration::from_millis(typing_delay_ms),
            request_timeout: timeout_secs.map(Duration::from_secs),
        }
    }
}
