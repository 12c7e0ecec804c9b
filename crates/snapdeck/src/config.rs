use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::theme::Theme;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "snapdeck";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,

    /// 1-indexed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<PathBuf>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `snapdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e:#}");
                Self::default()
            }
        }
    }

    /// Like `load_from`, but a missing file yields the defaults. A file that
    /// exists and fails to parse is still an error, so callers that save
    /// afterwards never overwrite settings they could not read.
    pub fn load_existing_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# snapdeck configuration\n{yaml}");
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let defaults = self.defaults.get_or_insert_with(DefaultsConfig::default);
        match key {
            "defaults.theme" => {
                if !Theme::is_valid_name(value) {
                    anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'.");
                }
                defaults.theme = Some(value.to_string());
            }
            "defaults.windowed" => {
                let windowed = match value {
                    "true" => true,
                    "false" => false,
                    _ => anyhow::bail!("Invalid windowed: {value}. Must be 'true' or 'false'."),
                };
                defaults.windowed = Some(windowed);
            }
            "defaults.start_slide" => match value.parse::<usize>() {
                Ok(n) if n >= 1 => defaults.start_slide = Some(n),
                _ => anyhow::bail!(
                    "Invalid start_slide: {value}. Must be a slide number (1 or higher)."
                ),
            },
            "defaults.logo" => {
                if value.is_empty() {
                    anyhow::bail!("Invalid logo: path must not be empty.");
                }
                defaults.logo = Some(PathBuf::from(value));
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.windowed, defaults.start_slide, defaults.logo"
            ),
        }
        Ok(())
    }

    pub fn theme(&self) -> Option<&str> {
        self.defaults.as_ref()?.theme.as_deref()
    }

    pub fn windowed(&self) -> Option<bool> {
        self.defaults.as_ref()?.windowed
    }

    pub fn start_slide(&self) -> Option<usize> {
        self.defaults.as_ref()?.start_slide
    }

    pub fn logo(&self) -> Option<&Path> {
        self.defaults.as_ref()?.logo.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_validates_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "light").is_ok());
        assert!(config.set("defaults.theme", "neon").is_err());
        assert!(config.set("defaults.windowed", "yes").is_err());
        assert!(config.set("defaults.start_slide", "0").is_err());
        assert!(config.set("defaults.start_slide", "abc").is_err());
        assert!(config.set("defaults.logo", "").is_err());
        assert!(config.set("defaults.transition", "fade").is_err());
        assert_eq!(config.theme(), Some("light"));
        assert_eq!(config.start_slide(), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(FILENAME);

        let mut config = Config::default();
        config.set("defaults.theme", "light").expect("theme");
        config.set("defaults.windowed", "true").expect("windowed");
        config.set("defaults.start_slide", "7").expect("start");
        config.set("defaults.logo", "assets/logo.png").expect("logo");
        config.save_to(&path).expect("save");

        let written = std::fs::read_to_string(&path).expect("read");
        assert!(written.starts_with("# snapdeck configuration"));

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, config);
        assert_eq!(loaded.windowed(), Some(true));
        assert_eq!(loaded.start_slide(), Some(7));
        assert_eq!(loaded.logo(), Some(Path::new("assets/logo.png")));
    }

    #[test]
    fn missing_file_mentions_config_show() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Config::load_from(&dir.path().join(FILENAME)).unwrap_err();
        assert!(err.to_string().contains("snapdeck config show"));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(FILENAME);
        std::fs::write(&path, "defaults: [not, a, map]\n").expect("write");
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn load_existing_or_default_keeps_parse_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(FILENAME);
        assert_eq!(Config::load_existing_or_default(&path).expect("missing"), Config::default());

        std::fs::write(&path, "defaults:\n  theme: light\n  windowed: yes-please\n").expect("write");
        assert!(Config::load_existing_or_default(&path).is_err());
    }

    #[test]
    fn empty_config_serializes_to_nothing() {
        let yaml = serde_yaml::to_string(&Config::default()).expect("yaml");
        assert_eq!(yaml.trim(), "{}");
    }
}
