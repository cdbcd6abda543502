//! Palette command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::color::to_hex;
use crate::config::{load_config, session_options};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the palette command
pub fn run_palette(config: Option<&Path>, json: bool) -> ExitCode {
    let options = match load_config(config).and_then(|c| session_options(&c)) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let colors: Vec<String> = options.palette.colors().iter().map(|c| to_hex(*c)).collect();

    if json {
        let value = serde_json::json!({
            "colors": colors,
            "background": colors[0],
            "selected": to_hex(options.selected_color),
        });
        println!("{}", value);
        return ExitCode::from(EXIT_SUCCESS);
    }

    for (i, color) in colors.iter().enumerate() {
        if i == 0 {
            println!("{:>2}  {}  (background)", i, color);
        } else {
            println!("{:>2}  {}", i, color);
        }
    }
    println!("selected: {}", to_hex(options.selected_color));
    ExitCode::from(EXIT_SUCCESS)
}
