use crate::error::{PhotoKmlError, Result};
use crate::models::MapSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "photokml.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Cli => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for photokml
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub map_name: ConfigValue<String>,
    pub description: ConfigValue<String>,
    pub min_distance: ConfigValue<f64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let defaults = MapSettings::default();
        Self {
            map_name: ConfigValue::new(defaults.name, ConfigSource::Default),
            description: ConfigValue::new(defaults.description, ConfigSource::Default),
            min_distance: ConfigValue::new(defaults.min_distance, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| PhotoKmlError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| PhotoKmlError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        // Update values from file
        if let Some(map_name) = file_config.map_name {
            self.map_name.update(map_name, ConfigSource::File);
        }

        if let Some(description) = file_config.description {
            self.description.update(description, ConfigSource::File);
        }

        if let Some(min_distance) = file_config.min_distance {
            self.min_distance
                .update(validate_min_distance(min_distance)?, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from a TOML file if it exists
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            self.load_from_file(path)
        } else {
            Ok(self)
        }
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) -> Result<()> {
        if let Some(map_name) = overrides.map_name {
            self.map_name.update(map_name, ConfigSource::Cli);
        }

        if let Some(description) = overrides.description {
            self.description.update(description, ConfigSource::Cli);
        }

        if let Some(min_distance) = overrides.min_distance {
            self.min_distance
                .update(validate_min_distance(min_distance)?, ConfigSource::Cli);
        }

        Ok(())
    }

    /// Resolve the layered values into export settings
    pub fn to_map_settings(&self) -> MapSettings {
        MapSettings {
            name: self.map_name.value.clone(),
            description: self.description.value.clone(),
            min_distance: self.min_distance.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "map_name".to_string(),
            (self.map_name.value.clone(), self.map_name.source),
        );

        map.insert(
            "description".to_string(),
            (self.description.value.clone(), self.description.source),
        );

        map.insert(
            "min_distance".to_string(),
            (format!("{} m", self.min_distance.value), self.min_distance.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    map_name: Option<String>,
    description: Option<String>,
    min_distance: Option<f64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub map_name: Option<String>,
    pub description: Option<String>,
    pub min_distance: Option<f64>,
}

/// Check a minimum distance threshold in meters
pub fn validate_min_distance(value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(PhotoKmlError::ConfigInvalid {
            key: "min_distance".to_string(),
            reason: format!("{} is not a non-negative number of meters", value),
        });
    }
    Ok(value)
}

/// Parse a minimum distance threshold such as `250`, `250m` or `1.5km`
pub fn parse_min_distance(s: &str) -> Result<f64> {
    let trimmed = s.trim().to_lowercase();
    let (number, factor) = if let Some(km) = trimmed.strip_suffix("km") {
        (km, 1000.0)
    } else if let Some(m) = trimmed.strip_suffix('m') {
        (m, 1.0)
    } else {
        (trimmed.as_str(), 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| PhotoKmlError::ConfigInvalid {
            key: "min_distance".to_string(),
            reason: format!("Invalid distance: {}. Use meters (250, 250m) or kilometers (1.5km)", s),
        })?;

    validate_min_distance(value * factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.map_name.value, "Photos");
        assert_eq!(config.map_name.source, ConfigSource::Default);
        assert_eq!(config.description.value, "");
        assert_eq!(config.min_distance.value, 0.0);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // CLI should override file
        value.update(300, ConfigSource::Cli);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(400, ConfigSource::File);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
map_name = "Road trip"
description = "Summer 2019"
min_distance = 250.0
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.map_name.value, "Road trip");
        assert_eq!(config.map_name.source, ConfigSource::File);
        assert_eq!(config.description.value, "Summer 2019");
        assert_eq!(config.min_distance.value, 250.0);
        assert_eq!(config.min_distance.source, ConfigSource::File);
    }

    #[test]
    fn test_load_from_file_rejects_negative_distance() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "min_distance = -5.0").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(PhotoKmlError::ConfigInvalid { ref key, .. }) if key == "min_distance"));
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "map_name = ").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(PhotoKmlError::ConfigInvalid { ref key, .. }) if key == "file"));
    }

    #[test]
    fn test_missing_optional_file_keeps_defaults() {
        let config = LayeredConfig::with_defaults()
            .load_from_optional_file("/nonexistent/photokml.toml")
            .unwrap();
        assert_eq!(config.map_name.source, ConfigSource::Default);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            map_name: Some("Hike".to_string()),
            description: None,
            min_distance: Some(50.0),
        };

        config.update_from_cli(overrides).unwrap();

        assert_eq!(config.map_name.value, "Hike");
        assert_eq!(config.map_name.source, ConfigSource::Cli);
        assert_eq!(config.min_distance.value, 50.0);
        // This should still be the default
        assert_eq!(config.description.source, ConfigSource::Default);

        let settings = config.to_map_settings();
        assert_eq!(settings.name, "Hike");
        assert_eq!(settings.min_distance, 50.0);
    }

    #[test]
    fn test_cli_override_rejects_nan() {
        let mut config = LayeredConfig::with_defaults();
        let overrides = CliConfigOverrides {
            min_distance: Some(f64::NAN),
            ..Default::default()
        };
        assert!(config.update_from_cli(overrides).is_err());
        assert_eq!(config.min_distance.value, 0.0);
    }

    #[test]
    fn test_parse_min_distance() {
        assert_eq!(parse_min_distance("250").unwrap(), 250.0);
        assert_eq!(parse_min_distance("250m").unwrap(), 250.0);
        assert_eq!(parse_min_distance("1.5km").unwrap(), 1500.0);
        assert_eq!(parse_min_distance(" 2 KM ").unwrap(), 2000.0);
        assert!(parse_min_distance("-1").is_err());
        assert!(parse_min_distance("far").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("map_name"));
        assert!(map.contains_key("description"));
        assert!(map.contains_key("min_distance"));

        let (distance, source) = &map["min_distance"];
        assert_eq!(distance, "0 m");
        assert_eq!(*source, ConfigSource::Default);
    }
}
