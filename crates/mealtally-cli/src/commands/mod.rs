//! Subcommands.

pub mod config;
pub mod days;
pub mod export;
pub mod process;
pub mod receipts;
pub mod report;

use std::path::Path;

use chrono::Weekday;
use mealtally_core::MealType;
use mealtally_core::models::config::TallyConfig;
use mealtally_core::orders::rules::parse_weekday;
use tracing::debug;

/// Load configuration from `--config`, else the default config file if it
/// exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TallyConfig> {
    let config = match config_path {
        Some(path) => TallyConfig::from_file(Path::new(path))?,
        None => {
            let default_path = config::default_config_path();
            if default_path.exists() {
                debug!("Using config file {}", default_path.display());
                TallyConfig::from_file(&default_path)?
            } else {
                TallyConfig::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}

/// clap value parser for full weekday names.
pub fn parse_day(s: &str) -> Result<Weekday, String> {
    parse_weekday(s).map_err(|e| e.to_string())
}

/// clap value parser for meal types.
pub fn parse_meal(s: &str) -> Result<MealType, String> {
    s.parse::<MealType>().map_err(|e| e.to_string())
}
