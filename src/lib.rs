//! Pixelgrid - pixel-art editor core
//!
//! This library provides functionality to:
//! - Keep a square grid of colored cells and a rotating palette
//! - Paint with pencil, eraser and flood fill tools
//! - Replay interaction events from JSONL scripts
//! - Export the grid as a PNG and re-encode imported images

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod import;
pub mod output;
pub mod palette;
pub mod script;
pub mod session;
pub mod tools;

#[cfg(feature = "wasm")]
pub mod wasm;
