//! Configuration schema types for `pxg.toml`
//!
//! Every section is optional; missing values fall back to the editor
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::parse_color;
use crate::grid::DEFAULT_GRID_SIZE;
use crate::output::{DEFAULT_CELL_SIZE, DEFAULT_OUTPUT};
use crate::palette::DEFAULT_COLORS;

/// Grid section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows and columns
    #[serde(default = "default_grid_size")]
    pub size: i64,
    /// Export size of one cell in pixels
    #[serde(default = "default_cell_size")]
    pub cell_size: i64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { size: default_grid_size(), cell_size: default_cell_size() }
    }
}

fn default_grid_size() -> i64 {
    DEFAULT_GRID_SIZE as i64
}

fn default_cell_size() -> i64 {
    DEFAULT_CELL_SIZE as i64
}

/// Eraser section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraserConfig {
    #[serde(default = "default_eraser_size")]
    pub size: i64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self { size: default_eraser_size() }
    }
}

fn default_eraser_size() -> i64 {
    1
}

/// Palette section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Swatch colors, background first
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
    /// Initially selected color
    #[serde(default = "default_selected")]
    pub selected: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self { colors: default_colors(), selected: default_selected() }
    }
}

fn default_colors() -> Vec<String> {
    DEFAULT_COLORS.iter().map(|c| c.to_string()).collect()
}

fn default_selected() -> String {
    "#000000".to_string()
}

/// Export section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { output: default_output() }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

/// Complete `pxg.toml` configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PxgConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub eraser: EraserConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl PxgConfig {
    /// Validate the configuration and return all errors found.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.grid.size <= 0 {
            errors.push(format!("grid.size must be positive, got {}", self.grid.size));
        }
        if self.grid.cell_size <= 0 {
            errors.push(format!("grid.cell_size must be positive, got {}", self.grid.cell_size));
        } else if self.grid.cell_size > u32::MAX as i64 {
            errors.push(format!("grid.cell_size is too large: {}", self.grid.cell_size));
        }
        if self.eraser.size <= 0 {
            errors.push(format!("eraser.size must be positive, got {}", self.eraser.size));
        }

        if self.palette.colors.is_empty() {
            errors.push("palette.colors must contain at least one color".to_string());
        }
        for (i, color) in self.palette.colors.iter().enumerate() {
            if let Err(e) = parse_color(color) {
                errors.push(format!("palette.colors[{}] '{}': {}", i, color, e));
            }
        }
        if let Err(e) = parse_color(&self.palette.selected) {
            errors.push(format!("palette.selected '{}': {}", self.palette.selected, e));
        }

        if self.export.output.as_os_str().is_empty() {
            errors.push("export.output must not be empty".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PxgConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.grid.size, 16);
        assert_eq!(config.grid.cell_size, 20);
        assert_eq!(config.eraser.size, 1);
        assert_eq!(config.palette.colors.len(), 5);
        assert_eq!(config.export.output, PathBuf::from("pixel_art.png"));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: PxgConfig = toml::from_str(
            r##"
[grid]
size = 32

[palette]
colors = ["#000", "#fff"]
"##,
        )
        .unwrap();
        assert_eq!(config.grid.size, 32);
        assert_eq!(config.grid.cell_size, 20);
        assert_eq!(config.palette.colors, vec!["#000", "#fff"]);
        assert_eq!(config.palette.selected, "#000000");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: PxgConfig = toml::from_str("").unwrap();
        assert_eq!(config, PxgConfig::default());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = PxgConfig::default();
        config.grid.size = 0;
        config.grid.cell_size = -4;
        config.eraser.size = -1;
        config.palette.colors = vec!["#fff".to_string(), "bogus!".to_string()];
        config.palette.selected = String::new();

        let errors = config.validate();
        assert_eq!(errors.len(), 5, "{:?}", errors);
        assert!(errors[0].contains("grid.size"));
        assert!(errors[3].contains("palette.colors[1]"));
        assert!(errors[4].contains("palette.selected"));
    }

    #[test]
    fn test_validate_empty_palette() {
        let mut config = PxgConfig::default();
        config.palette.colors.clear();
        let errors = config.validate();
        assert_eq!(errors, vec!["palette.colors must contain at least one color".to_string()]);
    }
}
