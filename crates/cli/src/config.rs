//! Configuration management for the CLI
//!
//! Settings are layered: built-in defaults, then the JSON config file,
//! then `FLIGHTCAST_*` environment variables. Command-line flags are
//! applied on top by the caller.

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use flight_lib::route::DEFAULT_CARRIERS;
use flight_lib::FetchMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://model-api-flights.onrender.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const ENV_PREFIX: &str = "FLIGHTCAST";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// API endpoint URL
    pub api_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Carriers queried for route summaries
    pub carriers: Vec<String>,
    /// Query carriers concurrently instead of one at a time
    pub concurrent_carriers: bool,
    /// Default output format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            carriers: DEFAULT_CARRIERS.iter().map(|c| c.to_string()).collect(),
            concurrent_carriers: false,
            default_format: None,
        }
    }
}

impl Settings {
    /// Load settings from the given file (or the default location) and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("api_url", defaults.api_url)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("carriers", defaults.carriers)?
            .set_default("concurrent_carriers", defaults.concurrent_carriers)?
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Json)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("carriers"),
            )
            .build()
            .context("Failed to read configuration")?;

        let mut settings: Settings = settings
            .try_deserialize()
            .context("Failed to parse configuration")?;
        settings.carriers = settings
            .carriers
            .iter()
            .map(|c| c.trim().to_ascii_uppercase())
            .filter(|c| !c.is_empty())
            .collect();

        Ok(settings)
    }

    /// Save settings to the given file (or the default location)
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(config_path)
    }

    pub fn fetch_mode(&self) -> FetchMode {
        if self.concurrent_carriers {
            FetchMode::Concurrent
        } else {
            FetchMode::Sequential
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("flightcast").join("config.json"))
    }
}
