// src/config/file.rs
// File-based configuration from ~/.nextmove/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::catalog::{Catalog, CharacterProfile};

/// Top-level config structure
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Overrides for the option lists
#[derive(Debug, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub styles: Vec<String>,
    pub default_style: Option<String>,
    #[serde(default)]
    pub characters: Vec<CharacterProfile>,
}

impl FileConfig {
    /// Load config from `<data_dir>/config.toml`
    pub fn load(data_dir: &Path) -> Self {
        let path = Self::config_path(data_dir);

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    pub fn config_path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    /// The catalog every consumer receives
    pub fn catalog(&self) -> Catalog {
        Catalog::new(
            self.catalog.styles.clone(),
            self.catalog.default_style.clone(),
            self.catalog.characters.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[catalog]
styles = ["Direct", "Playful"]
default_style = "Playful"

[[catalog.characters]]
name = "Calm"
description = "Takes it slow."
"#;
        let config: FileConfig = toml::from_str(toml).unwrap();
        let catalog = config.catalog();
        assert_eq!(catalog.styles().len(), 2);
        assert_eq!(catalog.default_style().as_str(), "Playful");
        assert_eq!(catalog.characters().len(), 1);
        assert_eq!(catalog.characters()[0].example, "");
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.catalog(), Catalog::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig::load(dir.path());
        assert_eq!(config.catalog(), Catalog::default());
    }

    #[test]
    fn test_broken_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(FileConfig::config_path(dir.path()), "styles = [").unwrap();
        let config = FileConfig::load(dir.path());
        assert_eq!(config.catalog(), Catalog::default());
    }
}
