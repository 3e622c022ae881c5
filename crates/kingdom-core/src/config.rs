//! Configuration System
//!
//! Loads game settings from kingdom.toml so data locations, map generation and the
//! economy rules can be adjusted without recompiling. Every field has a default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "kingdom.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub game: SessionConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub economy: EconomyConfig,
}

/// Session parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: "Kingdom 2".to_string(),
        }
    }
}

/// Where the catalog data files live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory the data file names are resolved against
    pub dir: PathBuf,
    pub resources_file: String,
    pub creatables_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            resources_file: "resources.json".to_string(),
            creatables_file: "creatables.toml".to_string(),
        }
    }
}

/// World map generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Marker scattered over the empty map
    pub ground_cover: String,
    pub ground_cover_count: usize,
    /// Upper bound on random placement attempts
    pub max_placement_attempts: usize,
    pub seed: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            name: "Kingdom".to_string(),
            width: 40,
            height: 20,
            ground_cover: "grass".to_string(),
            ground_cover_count: 120,
            max_placement_attempts: 1200,
            seed: 42,
        }
    }
}

/// How creations interact with the inventory while they are built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomyMode {
    /// Affordability gates progress; nothing is deducted and nothing is produced
    #[default]
    Advisory,
    /// Prerequisites are paid once when work starts, outputs are delivered on completion
    Consume,
}

impl std::str::FromStr for EconomyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "advisory" => Ok(EconomyMode::Advisory),
            "consume" => Ok(EconomyMode::Consume),
            _ => Err(format!("unknown economy mode '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub mode: EconomyMode,
    /// Keep finished creations in the active list
    pub retain_completed: bool,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            mode: EconomyMode::Advisory,
            retain_completed: true,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a path, or use defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Full path of the resource table
    pub fn resources_path(&self) -> PathBuf {
        self.data.dir.join(&self.data.resources_file)
    }

    /// Full path of the creatable document
    pub fn creatables_path(&self) -> PathBuf {
        self.data.dir.join(&self.data.creatables_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.game.name, "Kingdom 2");
        assert_eq!(config.map.width, 40);
        assert_eq!(config.economy.mode, EconomyMode::Advisory);
        assert!(config.economy.retain_completed);
        assert_eq!(config.resources_path(), PathBuf::from("data/resources.json"));
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            [map]
            width = 8
            seed = 7

            [economy]
            mode = "consume"
            "#,
        )
        .unwrap();

        assert_eq!(config.map.width, 8);
        assert_eq!(config.map.height, 20);
        assert_eq!(config.map.seed, 7);
        assert_eq!(config.economy.mode, EconomyMode::Consume);
        assert!(config.economy.retain_completed);
        assert_eq!(config.game.name, "Kingdom 2");
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[game]\nname = \"Test Realm\"\n[data]\ndir = \"/opt/kingdom\"").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.game.name, "Test Realm");
        assert_eq!(
            config.creatables_path(),
            PathBuf::from("/opt/kingdom/creatables.toml")
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        assert!(GameConfig::load("does/not/exist.toml").is_err());
        let config = GameConfig::load_or_default("does/not/exist.toml");
        assert_eq!(config.map.ground_cover, "grass");
    }

    #[test]
    fn test_economy_mode_from_str() {
        assert_eq!("Consume".parse::<EconomyMode>(), Ok(EconomyMode::Consume));
        assert_eq!("advisory".parse::<EconomyMode>(), Ok(EconomyMode::Advisory));
        assert!("barter".parse::<EconomyMode>().is_err());
    }
}
