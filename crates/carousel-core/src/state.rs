//! Centered position persisted between runs

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mapper::Position;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCenter {
    #[serde(default)]
    pub center: Option<Position>,
}

impl SavedCenter {
    pub fn new(center: Option<Position>) -> Self {
        Self { center }
    }

    /// Read saved state. A missing file is an empty state.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved center {:?} to {}", self.center, path.display());
        Ok(())
    }
}
