//! Config module - where the vault database lives.
//!
//! The store path is an explicit [`VaultConfig`] handed to
//! `Repository`/`Vault` at construction, so tests can point each instance
//! at its own temporary store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};

/// Default database file name inside the data directory.
const DEFAULT_DB_FILE: &str = "tomelock.db";

/// Vault configuration (tomelock.toml).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultConfig {
    /// Config version (for future migrations)
    #[serde(default = "default_version")]
    pub version: u32,

    /// Path to the SQLite database file holding the encrypted vault
    pub db_path: PathBuf,
}

fn default_version() -> u32 {
    1
}

/// Default database path (~/.local/share/tomelock/tomelock.db or platform
/// equivalent).
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("tomelock").join(DEFAULT_DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

/// Default config file path (~/.config/tomelock/tomelock.toml or platform
/// equivalent).
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("tomelock"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tomelock.toml")
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            db_path: default_db_path(),
        }
    }
}

impl VaultConfig {
    /// Config pointing at a specific database file.
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| VaultError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Load from the default config path, falling back to defaults when the
    /// file does not exist yet.
    pub fn load_default() -> Result<Self> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config as TOML, creating parent directories if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VaultError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
