//! Configuration loading utilities for CLI commands

use crate::errors::{config_file_not_found, from_core};
use anyhow::Result;
use photokml_core::config::{
    parse_min_distance, CliConfigOverrides, LayeredConfig, DEFAULT_CONFIG_FILE,
};
use std::path::{Path, PathBuf};

/// Layered configuration together with the file it was read from
pub struct LoadedConfig {
    pub config: LayeredConfig,
    pub file: Option<PathBuf>,
}

/// Load configuration from `--config`, or `./photokml.toml` when present
pub fn load_config(config_path: Option<&Path>) -> Result<LoadedConfig> {
    let defaults = LayeredConfig::with_defaults();

    if let Some(path) = config_path {
        if !path.is_file() {
            return Err(config_file_not_found(path).into());
        }
        let config = defaults.load_from_file(path).map_err(from_core)?;
        return Ok(LoadedConfig {
            config,
            file: Some(path.to_path_buf()),
        });
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    let file = default_path.is_file().then(|| default_path.clone());
    let config = defaults
        .load_from_optional_file(&default_path)
        .map_err(from_core)?;
    Ok(LoadedConfig { config, file })
}

/// Load configuration with CLI overrides applied
pub fn load_config_with_overrides(
    config_path: Option<&Path>,
    map_name: Option<String>,
    description: Option<String>,
    min_distance: Option<&str>,
) -> Result<LoadedConfig> {
    let mut loaded = load_config(config_path)?;

    let min_distance = min_distance
        .map(parse_min_distance)
        .transpose()
        .map_err(from_core)?;

    loaded
        .config
        .update_from_cli(CliConfigOverrides {
            map_name,
            description,
            min_distance,
        })
        .map_err(from_core)?;

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photokml_core::config::ConfigSource;
    use std::fs;

    #[test]
    fn test_explicit_file_and_overrides() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "map_name = \"Alps\"\nmin_distance = 10.0\n").unwrap();

        let loaded =
            load_config_with_overrides(Some(&path), None, Some("Hiking".to_string()), Some("2km"))
                .unwrap();

        assert_eq!(loaded.file.as_deref(), Some(path.as_path()));
        let settings = loaded.config.to_map_settings();
        assert_eq!(settings.name, "Alps");
        assert_eq!(settings.description, "Hiking");
        assert_eq!(settings.min_distance, 2000.0);
        assert_eq!(loaded.config.min_distance.source, ConfigSource::Cli);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/photokml.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_distance_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("empty.toml");
        fs::write(&path, "").unwrap();

        let result = load_config_with_overrides(Some(&path), None, None, Some("-3m"));
        assert!(result.is_err());
    }
}
