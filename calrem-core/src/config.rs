//! calrem configuration.
//!
//! Read from `~/.config/calrem/config.toml`, with `CALREM_*` environment
//! variables layered on top (`CALREM_DEFAULT_VIEW=week`,
//! `CALREM_STORE__BACKEND=firestore`, `CALREM_STORE__PROJECT_ID=…`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalRemError, CalRemResult};
use crate::grid::ViewMode;
use crate::store::FirestoreConfig;

static DEFAULT_DATA_DIR: &str = "~/.local/share/calrem";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

/// Where reminders and users are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    File {
        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,
    },
    Firestore(FirestoreConfig),
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalRemConfig {
    /// View used by `calrem show` when `--view` is not given.
    #[serde(default)]
    pub default_view: ViewMode,

    #[serde(default)]
    pub store: StoreConfig,
}

impl CalRemConfig {
    pub fn config_dir() -> CalRemResult<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| CalRemError::Config("Could not determine config directory".into()))?
            .join("calrem"))
    }

    pub fn config_path() -> CalRemResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the user's config, writing a commented default file on first run.
    pub fn load() -> CalRemResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CalRemResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("CALREM")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| CalRemError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalRemError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalRemResult<()> {
        let contents = format!(
            "\
# calrem configuration

# View shown by `calrem show` (year, month, week or day):
# default_view = \"month\"

# Local storage (default):
# [store]
# backend = \"file\"
# data_dir = \"{}\"

# Cloud Firestore:
# [store]
# backend = \"firestore\"
# project_id = \"my-project\"
# api_key = \"...\"
# access_token = \"...\"
# endpoint = \"http://localhost:8080\"   # emulator
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalRemError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalRemError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
