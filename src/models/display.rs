use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{ModelError, non_empty};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Emerald,
    Navy,
    Burgundy,
    Gold,
}

impl Theme {
    pub fn all() -> [Theme; 4] {
        [Theme::Emerald, Theme::Navy, Theme::Burgundy, Theme::Gold]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Emerald => "emerald",
            Theme::Navy => "navy",
            Theme::Burgundy => "burgundy",
            Theme::Gold => "gold",
        }
    }

    pub fn next(&self) -> Theme {
        let all = Theme::all();
        let idx = all.iter().position(|t| t == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "emerald" => Ok(Theme::Emerald),
            "navy" => Ok(Theme::Navy),
            "burgundy" => Ok(Theme::Burgundy),
            "gold" => Ok(Theme::Gold),
            _ => Err(ModelError::UnknownTheme(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_true", alias = "show_shuruq")]
    pub show_sunrise: bool,
    #[serde(default = "default_true")]
    pub show_watermark: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ayah_arabic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ayah_translation: Option<String>,
    /// e.g. "(Surah An-Nisa 4:103)"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ayah_citation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            show_sunrise: true,
            show_watermark: true,
            ayah_arabic: None,
            ayah_translation: None,
            ayah_citation: None,
            announcement: None,
        }
    }
}

impl DisplayConfig {
    pub fn ayah_arabic(&self) -> Option<&str> {
        non_empty(&self.ayah_arabic)
    }

    pub fn ayah_translation(&self) -> Option<&str> {
        non_empty(&self.ayah_translation)
    }

    pub fn ayah_citation(&self) -> Option<&str> {
        non_empty(&self.ayah_citation)
    }

    pub fn announcement(&self) -> Option<&str> {
        non_empty(&self.announcement)
    }

    /// The scripture panel is one unit: shown if either text is present.
    pub fn has_scripture(&self) -> bool {
        self.ayah_arabic().is_some() || self.ayah_translation().is_some()
    }
}
