//! Configuration structs with defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sphpix_index::{IndexScheme, Nside};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Pixel grid settings.
    pub grid: GridConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Pixel grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Pixels along one edge of a base face.
    pub nside: i64,
    /// Ordering used for pixel indices read and printed by the tools.
    pub scheme: IndexScheme,
    /// Read and print angles in degrees rather than radians.
    pub degrees: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            nside: 16,
            scheme: IndexScheme::Nested,
            degrees: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl GridConfig {
    /// Validate the configured resolution against the configured scheme.
    pub fn resolution(&self) -> Result<Nside<i64>, ConfigError> {
        let nside = Nside::new(self.nside)?;
        if self.scheme.requires_power_of_two() {
            nside.require_power_of_two()?;
        }
        Ok(nside)
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sphpix_index::HealpixError;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("nside: 16"));
        assert!(ron_str.contains("scheme: nested"));
        assert!(ron_str.contains("log_level: \"info\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.grid.scheme = IndexScheme::Ring;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: Config = ron::from_str("(grid: (nside: 4))").unwrap();
        assert_eq!(config.grid.nside, 4);
        assert_eq!(config.grid.scheme, IndexScheme::Nested);
        assert!(config.grid.degrees);
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let result: Result<Config, _> = ron::from_str("(grid: (scheme: spiral))");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolution_validates() {
        let grid = GridConfig::default();
        assert_eq!(grid.resolution().unwrap().as_i64(), 16);

        let grid = GridConfig {
            nside: 12,
            scheme: IndexScheme::Nested,
            degrees: true,
        };
        assert!(matches!(
            grid.resolution(),
            Err(ConfigError::Grid(HealpixError::InvalidResolution { nside: 12, .. }))
        ));

        let grid = GridConfig {
            nside: 12,
            scheme: IndexScheme::Ring,
            degrees: false,
        };
        assert!(grid.resolution().is_ok());

        let grid = GridConfig {
            nside: 0,
            ..GridConfig::default()
        };
        assert!(grid.resolution().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.grid.nside = 1024;
        config.grid.degrees = false;
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sphpix");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.grid.nside = 64;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.grid.nside), Some(64));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// grid settings\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
