use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{DisplayConfig, Identity, PrayerSchedule};

/// Everything one render needs, snapshotted from the flyer file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlyerData {
    #[serde(default)]
    pub schedule: PrayerSchedule,
    #[serde(default)]
    pub identity: Identity,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl FlyerData {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Parsing flyer file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_toml_str(&content).with_context(|| format!("Loading {:?}", path))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Serializing flyer")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)
            .with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }
}
