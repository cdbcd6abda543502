//! Pixelgrid - command-line pixel-art editor: replay edits and export PNGs

use std::process::ExitCode;

use pixelgrid::cli;

fn main() -> ExitCode {
    env_logger::init();
    cli::run()
}
