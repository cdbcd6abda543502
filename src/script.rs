//! Interaction event scripts.
//!
//! A script is a stream of JSON5 objects, one interaction each, tagged by
//! `type`:
//!
//! ```text
//! {"type": "resize", "size": 8}
//! {"type": "tool", "tool": "fill"}
//! {"type": "color", "color": "#ff0000"}
//! {"type": "click", "row": 3, "col": 4}
//! ```
//!
//! Objects may be one per line (JSONL) or span several lines. The CLI also
//! accepts a compact `key=value` form for single events (`click=3,4`).

use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{EditError, Session};
use crate::tools::Tool;

/// One host interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    /// Select a tool (deselecting the others)
    Tool { tool: Tool },
    /// Color picker input
    Color { color: String },
    /// Interaction with a grid cell
    Click { row: usize, col: usize },
    /// Change the grid size, resetting all cells
    Resize { size: usize },
    /// Change the eraser size
    Eraser { size: usize },
    /// Click on a palette swatch (rotates the palette)
    Swatch { index: usize },
    /// Select a palette color, moving it to the front
    Pick { index: usize },
}

/// A warning collected while parsing a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    pub line: usize,
}

/// Events with the line each one started on.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub events: Vec<(usize, Event)>,
    pub warnings: Vec<Warning>,
}

/// Error from parsing a compact `key=value` event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid event '{input}': {message}")]
pub struct EventSpecError {
    pub input: String,
    pub message: String,
}

/// A replayed event failed.
#[derive(Debug, Error)]
#[error("line {line}: {source}")]
pub struct ReplayError {
    pub line: usize,
    #[source]
    pub source: EditError,
}

/// What a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub cells_changed: usize,
}

/// Parse a stream of JSON5 event objects.
///
/// Malformed objects are recorded as warnings and skipped; parsing continues
/// with the next object. An object left unclosed ends at the next line that
/// starts with `{`.
pub fn parse_stream<R: Read>(reader: R) -> ParseResult {
    use std::io::BufRead;

    let mut result = ParseResult::default();
    let mut accumulator = String::new();
    let mut start_line = 1;
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (idx, line) in std::io::BufReader::new(reader).lines().map_while(Result::ok).enumerate() {
        let current_line = idx + 1;

        // Events never nest objects, so a line opening a new object ends an
        // unterminated one
        if !accumulator.is_empty() && line.trim_start().starts_with('{') {
            push_object(&mut result, &accumulator, start_line);
            accumulator.clear();
            depth = 0;
            in_string = false;
            escape_next = false;
        }

        if accumulator.is_empty() {
            if line.trim().is_empty() || line.trim_start().starts_with("//") {
                continue;
            }
            start_line = current_line;
        } else {
            accumulator.push('\n');
        }
        accumulator.push_str(&line);

        // Track brace depth to find where each object ends
        for ch in line.chars() {
            if escape_next {
                escape_next = false;
                continue;
            }
            match ch {
                '\\' if in_string => escape_next = true,
                '"' => in_string = !in_string,
                '{' | '[' if !in_string => depth += 1,
                '}' | ']' if !in_string => depth -= 1,
                _ => {}
            }
        }

        if depth <= 0 {
            push_object(&mut result, &accumulator, start_line);
            accumulator.clear();
            depth = 0;
            in_string = false;
            escape_next = false;
        }
    }

    if !accumulator.trim().is_empty() {
        push_object(&mut result, &accumulator, start_line);
    }

    result
}

fn push_object(result: &mut ParseResult, text: &str, line: usize) {
    match json5::from_str::<Event>(text) {
        Ok(event) => result.events.push((line, event)),
        Err(e) => {
            log::warn!("skipping event at line {}: {}", line, e);
            result.warnings.push(Warning { message: e.to_string(), line });
        }
    }
}

/// Parse a compact event: `tool=fill`, `color=#f00`, `click=3,4`,
/// `resize=8`, `eraser=3`, `swatch=2`, `pick=1`.
pub fn parse_event_spec(spec: &str) -> Result<Event, EventSpecError> {
    let err = |message: String| EventSpecError { input: spec.to_string(), message };

    let (key, value) = spec
        .split_once('=')
        .ok_or_else(|| err("expected KEY=VALUE".to_string()))?;
    let value = value.trim();
    let number = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|_| err(format!("'{}' is not a non-negative integer", v.trim())))
    };

    match key.trim() {
        "tool" => value.parse::<Tool>().map(|tool| Event::Tool { tool }).map_err(err),
        "color" => Ok(Event::Color { color: value.to_string() }),
        "click" => {
            let (row, col) = value
                .split_once(',')
                .ok_or_else(|| err("expected ROW,COL".to_string()))?;
            Ok(Event::Click { row: number(row)?, col: number(col)? })
        }
        "resize" => Ok(Event::Resize { size: number(value)? }),
        "eraser" => Ok(Event::Eraser { size: number(value)? }),
        "swatch" => Ok(Event::Swatch { index: number(value)? }),
        "pick" => Ok(Event::Pick { index: number(value)? }),
        other => Err(err(format!(
            "unknown event '{}', expected tool, color, click, resize, eraser, swatch or pick",
            other
        ))),
    }
}

/// Apply events in order, stopping at the first one that fails.
///
/// Events before the failing one stay applied.
pub fn replay(session: &mut Session, events: &[(usize, Event)]) -> Result<ReplaySummary, ReplayError> {
    let mut summary = ReplaySummary::default();
    for (line, event) in events {
        let changes = session
            .apply_event(event)
            .map_err(|source| ReplayError { line: *line, source })?;
        summary.events += 1;
        summary.cells_changed += changes.len();
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionOptions;
    use std::io::Cursor;

    #[test]
    fn test_parse_jsonl() {
        let input = r##"{"type": "resize", "size": 4}
{"type": "tool", "tool": "pencil"}
{"type": "color", "color": "#ff0000"}
{"type": "click", "row": 1, "col": 2}"##;
        let result = parse_stream(Cursor::new(input));
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(
            result.events,
            vec![
                (1, Event::Resize { size: 4 }),
                (2, Event::Tool { tool: Tool::Pencil }),
                (3, Event::Color { color: "#ff0000".to_string() }),
                (4, Event::Click { row: 1, col: 2 }),
            ]
        );
    }

    #[test]
    fn test_parse_multiline_json5() {
        let input = r#"
// comments and blank lines are skipped
{
  type: "click",
  row: 0,
  col: 0,   // trailing comma is fine
}

{type: "swatch", index: 1}
"#;
        let result = parse_stream(Cursor::new(input));
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.events.len(), 2);
        assert_eq!(result.events[0], (3, Event::Click { row: 0, col: 0 }));
        assert_eq!(result.events[1], (9, Event::Swatch { index: 1 }));
    }

    #[test]
    fn test_parse_braces_inside_strings() {
        let input = r#"{"type": "color", "color": "{not a brace"}"#;
        let result = parse_stream(Cursor::new(input));
        assert_eq!(result.events.len(), 1);
    }

    #[test]
    fn test_parse_collects_warnings_and_continues() {
        let input = r#"{"type": "click", "row": 0}
{"type": "teleport"}
{"type": "tool", "tool": "fill"}"#;
        let result = parse_stream(Cursor::new(input));
        assert_eq!(result.events, vec![(3, Event::Tool { tool: Tool::Fill })]);
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.warnings[0].line, 1);
        assert_eq!(result.warnings[1].line, 2);
    }

    #[test]
    fn test_parse_unclosed_object_does_not_swallow_following_lines() {
        let input = r#"{"type": "click", "row": 0
{"type": "tool", "tool": "pencil"}
{"type": "click", "row": 1, "col": 1}"#;
        let result = parse_stream(Cursor::new(input));
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].line, 1);
        assert_eq!(
            result.events,
            vec![
                (2, Event::Tool { tool: Tool::Pencil }),
                (3, Event::Click { row: 1, col: 1 }),
            ]
        );
    }

    #[test]
    fn test_parse_event_spec() {
        assert_eq!(parse_event_spec("tool=eraser"), Ok(Event::Tool { tool: Tool::Eraser }));
        assert_eq!(
            parse_event_spec("color=#00ff00"),
            Ok(Event::Color { color: "#00ff00".to_string() })
        );
        assert_eq!(parse_event_spec("click=3, 4"), Ok(Event::Click { row: 3, col: 4 }));
        assert_eq!(parse_event_spec("resize=8"), Ok(Event::Resize { size: 8 }));
        assert_eq!(parse_event_spec("eraser=3"), Ok(Event::Eraser { size: 3 }));
        assert_eq!(parse_event_spec("swatch=0"), Ok(Event::Swatch { index: 0 }));
        assert_eq!(parse_event_spec("pick=2"), Ok(Event::Pick { index: 2 }));
    }

    #[test]
    fn test_parse_event_spec_errors() {
        for bad in ["click", "click=3", "click=a,b", "resize=-1", "tool=brush", "jump=1"] {
            assert!(parse_event_spec(bad).is_err(), "'{}' should fail", bad);
        }
    }

    #[test]
    fn test_replay_stops_at_first_error() {
        let mut session = Session::new(SessionOptions { grid_size: 3, ..Default::default() })
            .unwrap();
        let events = vec![
            (1, Event::Tool { tool: Tool::Pencil }),
            (2, Event::Click { row: 0, col: 0 }),
            (3, Event::Click { row: 9, col: 9 }),
            (4, Event::Click { row: 1, col: 1 }),
        ];
        let err = replay(&mut session, &events).unwrap_err();
        assert_eq!(err.line, 3);
        assert_ne!(session.grid().get(0, 0), session.grid().get(1, 1));
    }

    #[test]
    fn test_replay_summary() {
        let mut session = Session::new(SessionOptions::default()).unwrap();
        let events = vec![
            (1, Event::Resize { size: 2 }),
            (2, Event::Tool { tool: Tool::Fill }),
            (3, Event::Click { row: 0, col: 0 }),
        ];
        let summary = replay(&mut session, &events).unwrap();
        assert_eq!(summary, ReplaySummary { events: 3, cells_changed: 8 });
    }
}
