//! Configuration module for pixelgrid
//!
//! Provides types and parsing for `pxg.toml` editor defaults.

pub mod loader;
pub mod schema;

pub use loader::{
    cell_size, find_config, find_config_from, load_config, merge_cli_overrides, session_options,
    CliOverrides, ConfigError,
};
pub use schema::*;
