//! Precondition errors shared by the grid model and the tool engine

use thiserror::Error;

/// Error type for grid and tool operations.
///
/// Every operation validates its arguments before touching the grid, so an
/// `Err` always means nothing was modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A size-like value (grid size, cell pixel size, eraser size) was zero
    /// or otherwise unusable.
    #[error("invalid {what}: {value} (must be a positive integer)")]
    InvalidDimension { what: &'static str, value: usize },
    /// A coordinate fell outside `[0, size)`.
    #[error("cell ({row}, {col}) out of bounds for {size}x{size} grid")]
    IndexOutOfBounds { row: usize, col: usize, size: usize },
}

impl GridError {
    pub(crate) fn dimension(what: &'static str, value: usize) -> Self {
        GridError::InvalidDimension { what, value }
    }
}
