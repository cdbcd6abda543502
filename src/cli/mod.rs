//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod import;
mod paint;
mod palette;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::tools::Tool;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Pixelgrid - paint a pixel grid with pencil, eraser and flood fill, export to PNG
#[derive(Parser)]
#[command(name = "pxg")]
#[command(about = "Pixelgrid - paint a pixel grid with pencil, eraser and flood fill, export to PNG")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay interaction events on a fresh grid and export the result
    Paint {
        /// Event script (JSONL / JSON5 objects tagged by "type")
        #[arg(long)]
        script: Option<PathBuf>,

        /// Inline event, applied after the script, in order given.
        /// Forms: tool=fill, color=#f00, click=ROW,COL, resize=N, eraser=N,
        /// swatch=I, pick=I
        #[arg(short, long = "event", value_name = "KEY=VALUE")]
        events: Vec<String>,

        /// Grid size (overrides config)
        #[arg(long)]
        size: Option<usize>,

        /// Eraser size (overrides config)
        #[arg(long)]
        eraser: Option<usize>,

        /// Initially selected color (overrides config)
        #[arg(long)]
        color: Option<String>,

        /// Initially active tool
        #[arg(long, value_enum, default_value = "none")]
        tool: Tool,

        /// Pixel size of one cell in the exported image (overrides config)
        #[arg(long)]
        cell_size: Option<u32>,

        /// Output PNG path (default: pixel_art.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the grid as hex rows instead of writing a PNG
        #[arg(long)]
        print: bool,

        /// Strict mode: treat script warnings as errors
        #[arg(long)]
        strict: bool,

        /// Config file (default: discover pxg.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Re-encode an image as PNG, preserving transparency
    Import {
        /// Input image (any format the decoder recognizes)
        input: PathBuf,

        /// Where to save the PNG. Without it the result is only logged.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the configured palette
    Palette {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Config file (default: discover pxg.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Paint {
            script,
            events,
            size,
            eraser,
            color,
            tool,
            cell_size,
            output,
            print,
            strict,
            config,
        } => paint::run_paint(paint::PaintArgs {
            script: script.as_deref(),
            events: &events,
            size,
            eraser,
            color,
            tool,
            cell_size,
            output,
            print,
            strict,
            config: config.as_deref(),
        }),
        Commands::Import { input, output } => import::run_import(&input, output.as_deref()),
        Commands::Palette { json, config } => palette::run_palette(config.as_deref(), json),
    }
}
