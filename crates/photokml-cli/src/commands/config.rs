//! Config command implementation

use crate::config_loader::load_config;
use crate::output::OutputWriter;
use crate::output_types::{ConfigOutput, ConfigValue};
use anyhow::Result;
use std::path::Path;
use tabled::Tabled;

pub fn execute(config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let loaded = load_config(config_path)?;
    let config = &loaded.config;

    if output.is_json() {
        output.result(ConfigOutput {
            config_file: loaded.file.as_ref().map(|p| p.display().to_string()),
            map_name: ConfigValue {
                value: config.map_name.value.clone(),
                source: format!("{:?}", config.map_name.source),
            },
            description: ConfigValue {
                value: config.description.value.clone(),
                source: format!("{:?}", config.description.source),
            },
            min_distance: ConfigValue {
                value: config.min_distance.value,
                source: format!("{:?}", config.min_distance.source),
            },
        })?;
        return Ok(());
    }

    output.section("Configuration Values");

    #[derive(Tabled)]
    struct ConfigRow {
        #[tabled(rename = "Key")]
        key: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Source")]
        source: String,
    }

    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow {
            key,
            value,
            source: format!("{:?}", source),
        })
        .collect();

    // Sort by key for consistent output
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    output.table(rows);

    output.section("Configuration File");
    match loaded.file {
        Some(path) => output.kv("Loaded", path.display()),
        None => output.info("No configuration file found, using defaults"),
    }

    output.section("Configuration Precedence");
    output.info("CLI arguments > Config file > Defaults");

    Ok(())
}
