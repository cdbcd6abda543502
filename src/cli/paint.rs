//! CLI dispatch for the `pxg paint` command.
//!
//! Builds a session from config and flags, replays the script and inline
//! events, then exports.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{cell_size, load_config, merge_cli_overrides, session_options, CliOverrides};
use crate::output::save_png;
use crate::script::{parse_event_spec, parse_stream, replay, Event};
use crate::session::Session;
use crate::tools::Tool;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

pub struct PaintArgs<'a> {
    pub script: Option<&'a Path>,
    pub events: &'a [String],
    pub size: Option<usize>,
    pub eraser: Option<usize>,
    pub color: Option<String>,
    pub tool: Tool,
    pub cell_size: Option<u32>,
    pub output: Option<PathBuf>,
    pub print: bool,
    pub strict: bool,
    pub config: Option<&'a Path>,
}

/// Execute the paint command.
pub fn run_paint(args: PaintArgs<'_>) -> ExitCode {
    let mut config = match load_config(args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    merge_cli_overrides(
        &mut config,
        &CliOverrides {
            grid_size: args.size,
            cell_size: args.cell_size,
            eraser_size: args.eraser,
            selected: args.color,
            output: args.output,
        },
    );

    let options = match session_options(&config) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    let mut session = match Session::new(options) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    session.select_tool(args.tool);

    // Parse everything up front so a bad inline event doesn't leave a half-run
    let inline: Vec<(usize, Event)> = match args
        .events
        .iter()
        .enumerate()
        .map(|(i, spec)| parse_event_spec(spec).map(|e| (i + 1, e)))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut applied = 0;
    let mut changed = 0;

    if let Some(script_path) = args.script {
        let file = match File::open(script_path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error: Cannot open script '{}': {}", script_path.display(), e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        };
        let parsed = parse_stream(file);
        for warning in &parsed.warnings {
            let level = if args.strict { "Error" } else { "Warning" };
            eprintln!(
                "{}: {}: line {}: {}",
                level,
                script_path.display(),
                warning.line,
                warning.message
            );
        }
        if args.strict && !parsed.warnings.is_empty() {
            return ExitCode::from(EXIT_ERROR);
        }

        match replay(&mut session, &parsed.events) {
            Ok(summary) => {
                applied += summary.events;
                changed += summary.cells_changed;
            }
            Err(e) => {
                eprintln!("Error: {}: {}", script_path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    match replay(&mut session, &inline) {
        Ok(summary) => {
            applied += summary.events;
            changed += summary.cells_changed;
        }
        Err(e) => {
            eprintln!("Error: --event #{}: {}", e.line, e.source);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    log::info!("applied {} events, {} cell changes", applied, changed);

    if args.print {
        for row in session.grid().to_hex_rows() {
            println!("{}", row);
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    let image = match session.export_image(cell_size(&config)) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let target = &config.export.output;
    if let Err(e) = save_png(&image, target) {
        eprintln!("Error: '{}': {}", target.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    eprintln!("Wrote: {}", target.display());
    ExitCode::from(EXIT_SUCCESS)
}
