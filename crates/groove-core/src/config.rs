use groove_schema::DEFAULT_STORE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the repository root when none is given explicitly.
pub const CONFIG_FILE_NAME: &str = "groove.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("store.name must not be empty")]
    EmptyStoreName,
}

/// Repository-level settings for the index builder and validator.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreSection,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default = "default_name")]
    pub name: String,
    /// Dataset root, relative to the repository root.
    #[serde(default = "default_db_dir")]
    pub db_dir: PathBuf,
    /// Index output file, relative to the repository root.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            db_dir: default_db_dir(),
            output: default_output(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_STORE_NAME.to_owned()
}

fn default_db_dir() -> PathBuf {
    PathBuf::from("db")
}

fn default_output() -> PathBuf {
    PathBuf::from("store.json")
}

impl StoreConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else `<repo>/groove.toml` if it exists,
    /// else the built-in defaults.
    pub fn resolve(repo: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = repo.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::EmptyStoreName);
        }
        Ok(())
    }

    #[inline]
    pub fn dataset_root(&self, repo: &Path) -> PathBuf {
        repo.join(&self.store.db_dir)
    }

    #[inline]
    pub fn output_path(&self, repo: &Path) -> PathBuf {
        repo.join(&self.store.output)
    }
}
