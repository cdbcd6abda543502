//! Import command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::import::{import_into, FileSink, ImageSink, LogSink};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the import command
pub fn run_import(input: &Path, output: Option<&Path>) -> ExitCode {
    let bytes = match std::fs::read(input) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut file_sink;
    let mut log_sink = LogSink::default();
    let sink: &mut dyn ImageSink = match output {
        Some(path) => {
            file_sink = FileSink::new(path);
            &mut file_sink
        }
        None => &mut log_sink,
    };

    let image = match import_into(&bytes, sink) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match output {
        Some(path) => println!("Imported: {} ({}x{})", path.display(), image.width, image.height),
        None => println!(
            "Imported: {} ({}x{}, not saved; pass --output to write it)",
            input.display(),
            image.width,
            image.height
        ),
    }
    ExitCode::from(EXIT_SUCCESS)
}
