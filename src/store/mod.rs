//! JSON-backed configuration persistence
//!
//! One file holds everything: the preset list and the download history.
//! Loading is permissive (a missing file is an empty state); saving is
//! best-effort and auto-triggered after every mutation.

use crate::preset::Preset;
use crate::utils::error::PresetdlError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Saved download history, kept as two parallel, equal-length lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub urls: Vec<String>,
    pub names: Vec<String>,
}

/// The complete persisted application state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigData {
    pub history: HistoryConfig,
    pub presets: Vec<Preset>,
}

/// Handle to the on-disk configuration file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store rooted at the per-user configuration directory, creating the
    /// directory when missing. Failure here is fatal at startup.
    pub fn open_default() -> Result<Self, PresetdlError> {
        let dir = dirs::config_dir()
            .ok_or(PresetdlError::ConfigDirUnavailable)?
            .join("presetdl");
        Self::open_at(&dir)
    }

    /// Store rooted at an explicit directory.
    pub fn open_at(dir: &Path) -> Result<Self, PresetdlError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join("config.json"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved state. A missing file is an empty state, not an
    /// error; malformed JSON is reported so the caller can substitute
    /// defaults.
    pub fn load(&self) -> Result<ConfigData, PresetdlError> {
        if !self.path.exists() {
            debug!("no config file at {}, starting empty", self.path.display());
            return Ok(ConfigData::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let mut config: ConfigData = serde_json::from_str(&data)?;
        pad_history(&mut config.history);
        Ok(config)
    }

    /// Writes the state as pretty-printed JSON, repairing any history
    /// length mismatch first.
    pub fn save(
        &self,
        urls: &[String],
        names: &[String],
        presets: &[Preset],
    ) -> Result<(), PresetdlError> {
        let mut history = HistoryConfig {
            urls: urls.to_vec(),
            names: names.to_vec(),
        };
        pad_history(&mut history);

        let config = ConfigData {
            history,
            presets: presets.to_vec(),
        };
        let data = serde_json::to_string_pretty(&config)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    /// Fire-and-forget save: failures are logged, never propagated, never
    /// retried. The next mutation attempts a fresh save.
    pub fn autosave(&self, urls: &[String], names: &[String], presets: &[Preset]) {
        match self.save(urls, names, presets) {
            Ok(()) => debug!("config saved"),
            Err(e) => warn!("failed to save config: {e}"),
        }
    }
}

/// Pads the shorter of the two history lists with empty strings so they
/// stay the same length.
fn pad_history(history: &mut HistoryConfig) {
    while history.names.len() < history.urls.len() {
        history.names.push(String::new());
    }
    while history.urls.len() < history.names.len() {
        history.urls.push(String::new());
    }
}
