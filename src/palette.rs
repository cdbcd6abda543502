//! Ordered swatch palette.
//!
//! The first color is the background: new and resized grids start with it and
//! the eraser paints it.

use image::Rgba;
use thiserror::Error;

use crate::color::{parse_color, Color, ColorError};

/// Colors of the stock palette, background first.
pub const DEFAULT_COLORS: [&str; 5] = ["#ffffff", "#000000", "#ff0000", "#0000ff", "#00ff00"];

/// Error type for palette construction and lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette must contain at least one color")]
    Empty,
    #[error("palette color {index} ('{value}'): {source}")]
    InvalidColor {
        index: usize,
        value: String,
        #[source]
        source: ColorError,
    },
    #[error("swatch {index} out of range for palette of {len} colors")]
    OutOfRange { index: usize, len: usize },
}

/// A non-empty, ordered list of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Palette { colors })
    }

    /// Build a palette from CSS color strings.
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self, PaletteError> {
        let colors = values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                parse_color(value.as_ref()).map_err(|source| PaletteError::InvalidColor {
                    index,
                    value: value.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(colors)
    }

    /// The background color (index 0).
    pub fn background(&self) -> Color {
        self.colors[0]
    }

    pub fn get(&self, index: usize) -> Result<Color, PaletteError> {
        self.colors
            .get(index)
            .copied()
            .ok_or(PaletteError::OutOfRange { index, len: self.colors.len() })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Move the last color to the front.
    pub fn rotate(&mut self) {
        self.colors.rotate_right(1);
    }

    /// Move `color` to the front, inserting it if it isn't present yet.
    pub fn promote(&mut self, color: Color) {
        match self.colors.iter().position(|c| *c == color) {
            Some(pos) => self.colors[..=pos].rotate_right(1),
            None => self.colors.insert(0, color),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: vec![
                Rgba([255, 255, 255, 255]),
                Rgba([0, 0, 0, 255]),
                Rgba([255, 0, 0, 255]),
                Rgba([0, 0, 255, 255]),
                Rgba([0, 255, 0, 255]),
            ],
        }
    }
}
