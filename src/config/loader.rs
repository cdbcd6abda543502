//! Configuration loading and discovery for `pxg.toml`
//!
//! Provides functions to find, load, and merge configuration, and to turn a
//! loaded configuration into session settings.

use super::schema::PxgConfig;
use crate::color::parse_color;
use crate::palette::Palette;
use crate::session::SessionOptions;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "pxg.toml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "PXG_CONFIG";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pxg.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub grid_size: Option<usize>,
    pub cell_size: Option<u32>,
    pub eraser_size: Option<usize>,
    pub selected: Option<String>,
    pub output: Option<PathBuf>,
}

/// Find the configuration file.
///
/// Search order:
/// 1. `$PXG_CONFIG`, if set
/// 2. Walk up from the current directory looking for pxg.toml
/// 3. `$XDG_CONFIG_HOME/pixelgrid/pxg.toml` (or `~/.config/pixelgrid/pxg.toml`)
pub fn find_config() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pxg.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pixelgrid").join(CONFIG_FILE);
    config_path.exists().then_some(config_path)
}

/// Find pxg.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from `path`, or from the discovered file, or defaults.
///
/// An explicit path that doesn't exist is an error; finding nothing during
/// discovery is not.
pub fn load_config(path: Option<&Path>) -> Result<PxgConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(PxgConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<PxgConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PxgConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut PxgConfig, overrides: &CliOverrides) {
    if let Some(size) = overrides.grid_size {
        config.grid.size = size as i64;
    }
    if let Some(cell_size) = overrides.cell_size {
        config.grid.cell_size = cell_size as i64;
    }
    if let Some(size) = overrides.eraser_size {
        config.eraser.size = size as i64;
    }
    if let Some(ref selected) = overrides.selected {
        config.palette.selected = selected.clone();
    }
    if let Some(ref output) = overrides.output {
        config.export.output = output.clone();
    }
}

/// Session settings described by a configuration.
///
/// Re-validates, since overrides may have been merged after loading.
pub fn session_options(config: &PxgConfig) -> Result<SessionOptions, ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    let palette = Palette::parse(config.palette.colors.as_slice())
        .map_err(|e| ConfigError::Validation(vec![e.to_string()]))?;
    let selected_color = parse_color(&config.palette.selected)
        .map_err(|e| ConfigError::Validation(vec![format!("palette.selected: {}", e)]))?;

    Ok(SessionOptions {
        grid_size: config.grid.size as usize,
        eraser_size: config.eraser.size as usize,
        palette,
        selected_color,
        ..Default::default()
    })
}

/// Export cell size from a validated configuration.
pub fn cell_size(config: &PxgConfig) -> u32 {
    u32::try_from(config.grid.cell_size).unwrap_or(crate::output::DEFAULT_CELL_SIZE)
}
