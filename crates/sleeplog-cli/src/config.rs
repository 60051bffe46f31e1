//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Snapshot key used when none is configured.
pub const DEFAULT_STORE_NAME: &str = "sleep";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Key the sleep log snapshot is stored under.
    pub store_name: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("sleeplog.db"),
            store_name: DEFAULT_STORE_NAME.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations, then `config_path` if given.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // SLEEPLOG_DATABASE_PATH, SLEEPLOG_STORE_NAME
        figment = figment.merge(Env::prefixed("SLEEPLOG_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for sleeplog.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sleeplog"))
}

/// Returns the platform-specific data directory for sleeplog.
///
/// On Linux: `~/.local/share/sleeplog`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("sleeplog"))
}
