//! Tool engine: pencil, eraser and flood fill.
//!
//! Each tool takes a target cell, mutates the grid, and reports the cells
//! whose color actually changed so the host can re-render just those.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::GridError;
use crate::grid::Grid;

/// The active painting tool. Selecting one deselects the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// No tool selected; clicks paint nothing
    #[default]
    None,
    /// Paint the clicked cell with the selected color
    Pencil,
    /// Reset a square neighborhood to the background color
    Eraser,
    /// Flood fill the 4-connected region under the cursor
    Fill,
}

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Tool::None => "none",
            Tool::Pencil => "pencil",
            Tool::Eraser => "eraser",
            Tool::Fill => "fill",
        }
    }

    /// Apply this tool at (row, col).
    pub fn apply(
        self,
        grid: &mut Grid,
        row: usize,
        col: usize,
        ctx: &ToolContext,
    ) -> Result<Vec<CellChange>, GridError> {
        let changes = match self {
            Tool::None => {
                grid.check(row, col)?;
                Vec::new()
            }
            Tool::Pencil => pencil(grid, row, col, ctx.color)?,
            Tool::Eraser => erase(grid, row, col, ctx.eraser_size, ctx.background)?,
            Tool::Fill => flood_fill(grid, row, col, ctx.color)?,
        };
        log::debug!("{} at ({}, {}) changed {} cells", self, row, col, changes.len());
        Ok(changes)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Tool::None),
            "pencil" => Ok(Tool::Pencil),
            "eraser" | "erase" => Ok(Tool::Eraser),
            "fill" => Ok(Tool::Fill),
            other => Err(format!(
                "unknown tool '{}', expected one of: none, pencil, eraser, fill",
                other
            )),
        }
    }
}

/// The parts of editor state a tool reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolContext {
    /// Selected color used by pencil and fill
    pub color: Color,
    /// Palette background used by the eraser
    pub background: Color,
    /// Eraser brush size
    pub eraser_size: usize,
}

/// A cell that changed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellChange {
    pub row: usize,
    pub col: usize,
    #[serde(serialize_with = "serialize_color")]
    pub color: Color,
}

fn serialize_color<S: serde::Serializer>(color: &Color, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&crate::color::to_hex(*color))
}

/// Set one cell, reporting it only if the color differs.
fn paint(grid: &mut Grid, row: usize, col: usize, color: Color, out: &mut Vec<CellChange>) {
    let index = row * grid.size() + col;
    let cell = &mut grid.cells_mut()[index];
    if *cell != color {
        *cell = color;
        out.push(CellChange { row, col, color });
    }
}

/// Paint a single cell with `color`.
pub fn pencil(
    grid: &mut Grid,
    row: usize,
    col: usize,
    color: Color,
) -> Result<Vec<CellChange>, GridError> {
    grid.check(row, col)?;
    let mut changes = Vec::with_capacity(1);
    paint(grid, row, col, color, &mut changes);
    Ok(changes)
}

/// Reset every cell within `size / 2` rows and columns of (row, col) to
/// `background`, clipped to the grid.
pub fn erase(
    grid: &mut Grid,
    row: usize,
    col: usize,
    size: usize,
    background: Color,
) -> Result<Vec<CellChange>, GridError> {
    grid.check(row, col)?;
    if size == 0 {
        return Err(GridError::dimension("eraser size", size));
    }

    let half = size / 2;
    let n = grid.size();
    let rows = row.saturating_sub(half)..row.saturating_add(half + 1).min(n);
    let cols = col.saturating_sub(half)..col.saturating_add(half + 1).min(n);

    let mut changes = Vec::new();
    for r in rows {
        for c in cols.clone() {
            paint(grid, r, c, background, &mut changes);
        }
    }
    Ok(changes)
}

/// Flood fill from (row, col) using iterative BFS.
///
/// Repaints the 4-connected region of cells matching the start cell's color.
/// Filling with the color the start cell already has is a no-op. Changes are
/// reported in visiting order, start cell first.
pub fn flood_fill(
    grid: &mut Grid,
    row: usize,
    col: usize,
    color: Color,
) -> Result<Vec<CellChange>, GridError> {
    let target = grid.get(row, col)?;
    if target == color {
        return Ok(Vec::new());
    }

    let n = grid.size();
    let mut visited = vec![false; n * n];
    let mut queue = VecDeque::new();
    let mut changes = Vec::new();

    visited[row * n + col] = true;
    queue.push_back((row, col));

    while let Some((r, c)) = queue.pop_front() {
        paint(grid, r, c, color, &mut changes);

        let neighbors = [
            (r.wrapping_sub(1), c),
            (r + 1, c),
            (r, c.wrapping_sub(1)),
            (r, c + 1),
        ];
        for (nr, nc) in neighbors {
            if !grid.contains(nr, nc) {
                continue;
            }
            let index = nr * n + nc;
            if !visited[index] && grid.cells()[index] == target {
                visited[index] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    Ok(changes)
}
