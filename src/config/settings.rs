use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_latitude() -> f64 {
    33.6938
}
fn default_longitude() -> f64 {
    73.0651
}
fn default_location_name() -> String {
    "Islamabad".to_string()
}
fn default_calc_method() -> String {
    "MuslimWorldLeague".to_string()
}
fn default_madhab() -> String {
    "Hanafi".to_string()
}
fn default_timezone_offset() -> i32 {
    300
}
fn default_width() -> u32 {
    1080
}
fn default_height() -> u32 {
    1350
}
fn default_locale() -> String {
    "en-GB".to_string()
}
fn default_true() -> bool {
    true
}

/// Location used by `init --calculate` to prefill a new flyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalahConfig {
    #[serde(default = "default_location_name")]
    pub location_name: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_calc_method")]
    pub calc_method: String,
    #[serde(default = "default_madhab")]
    pub madhab: String,
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset: i32, // minutes from UTC
}

impl Default for SalahConfig {
    fn default() -> Self {
        Self {
            location_name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            calc_method: default_calc_method(),
            madhab: default_madhab(),
            timezone_offset: default_timezone_offset(),
        }
    }
}

/// Output size in pixels. The default is a 4:5 portrait that messaging apps
/// show without cropping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Load fonts installed on this machine.
    #[serde(default = "default_true")]
    pub use_system: bool,
    /// Extra font files, loaded after system fonts.
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// Family to prefer over the generic sans-serif.
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            use_system: true,
            files: vec![],
            family: None,
            locale: default_locale(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where `render` writes when no --output is given. Defaults to the
    /// current directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Refuse to export a flyer that doesn't say who posted it.
    #[serde(default = "default_true")]
    pub require_attribution: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            require_attribution: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub fonts: FontConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub salah: SalahConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "salat-flyer")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Parsing config.toml")
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Serializing config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_take_defaults() {
        let config = AppConfig::from_toml_str("[canvas]\nwidth = 720\n").unwrap();
        assert_eq!(config.canvas.width, 720);
        assert_eq!(config.canvas.height, 1350);
        assert!(config.fonts.use_system);
        assert_eq!(config.fonts.locale, "en-GB");
        assert!(config.export.require_attribution);
        assert_eq!(config.salah.calc_method, "MuslimWorldLeague");
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = AppConfig::default();
        config.fonts.family = Some("Noto Sans".into());
        config.export.require_attribution = false;
        let text = config.to_toml_string().unwrap();
        let back = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(back.fonts.family.as_deref(), Some("Noto Sans"));
        assert!(!back.export.require_attribution);
    }
}
