//! Grid configuration from environment variables.

use std::{env, fmt::Display, str::FromStr};

use anyhow::{Context, Result};
use availability_grid::GridConfig;
use tracing::{info, warn};

/// Load the grid shape, overriding defaults with `GRID_*` variables.
pub fn load() -> Result<GridConfig> {
    let defaults = GridConfig::default();
    let config = GridConfig {
        days: try_load("GRID_DAYS", defaults.days)?,
        slots: try_load("GRID_SLOTS", defaults.slots)?,
        start_hour: try_load("GRID_START_HOUR", defaults.start_hour)?,
        slot_minutes: try_load("GRID_SLOT_MINUTES", defaults.slot_minutes)?,
    };
    config.validate().context("Invalid GRID_* environment")?;
    Ok(config)
}

fn try_load<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e| {
            warn!("Invalid {key} value: {raw}");
            anyhow::Error::new(e).context(format!("Failed to parse {key}={raw}"))
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
