//! The square cell grid every tool paints on.
//!
//! The grid uses (row, col) coordinates where (0,0) is the top-left cell.
//! Cells are stored row-major, so cell (row, col) lives at `row * size + col`.

use image::{ImageBuffer, RgbaImage};

use crate::color::{to_hex, Color};
use crate::error::GridError;

/// Grid size used when nothing else is configured.
pub const DEFAULT_GRID_SIZE: usize = 16;

/// An N×N grid of colored cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Color>,
}

impl Grid {
    /// Create a `size`×`size` grid with every cell set to `background`.
    pub fn new(size: usize, background: Color) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::dimension("grid size", size));
        }
        let too_large = || GridError::dimension("grid size", size);
        let len = size.checked_mul(size).ok_or_else(too_large)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large())?;
        cells.resize(len, background);
        Ok(Grid { size, cells })
    }

    /// Reallocate the grid at a new size. Old contents are discarded.
    ///
    /// On error the grid is left exactly as it was.
    pub fn resize(&mut self, size: usize, background: Color) -> Result<(), GridError> {
        *self = Grid::new(size, background)?;
        Ok(())
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether (row, col) addresses a cell of this grid.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub(crate) fn check(&self, row: usize, col: usize) -> Result<(), GridError> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(GridError::IndexOutOfBounds { row, col, size: self.size })
        }
    }

    /// Translate (row, col) to the row-major cell index.
    pub fn index_of(&self, row: usize, col: usize) -> Result<usize, GridError> {
        self.check(row, col)?;
        Ok(row * self.size + col)
    }

    /// Translate a row-major cell index back to (row, col).
    pub fn position_of(&self, index: usize) -> Result<(usize, usize), GridError> {
        let (row, col) = (index / self.size, index % self.size);
        self.check(row, col)?;
        Ok((row, col))
    }

    /// Color of the cell at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<Color, GridError> {
        let index = self.index_of(row, col)?;
        Ok(self.cells[index])
    }

    /// Set the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize, color: Color) -> Result<(), GridError> {
        let index = self.index_of(row, col)?;
        self.cells[index] = color;
        Ok(())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Color] {
        &mut self.cells
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks(self.size)
    }

    /// One line per row, each cell as `#rrggbb` separated by spaces.
    pub fn to_hex_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|c| to_hex(*c)).collect::<Vec<_>>().join(" "))
            .collect()
    }

    /// Render the grid as a bitmap of solid `cell_px`×`cell_px` blocks.
    ///
    /// Cell (row, col) covers the block whose top-left pixel is
    /// (col·cell_px, row·cell_px). The image is (N·cell_px)×(N·cell_px).
    pub fn to_raster_image(&self, cell_px: u32) -> Result<RgbaImage, GridError> {
        if cell_px == 0 {
            return Err(GridError::dimension("cell pixel size", 0));
        }
        let side = u32::try_from(self.size)
            .ok()
            .and_then(|n| n.checked_mul(cell_px))
            .ok_or_else(|| GridError::dimension("cell pixel size", cell_px as usize))?;

        let too_large = || GridError::dimension("cell pixel size", cell_px as usize);
        let bytes = (side as usize)
            .checked_mul(side as usize)
            .and_then(|p| p.checked_mul(4))
            .ok_or_else(too_large)?;
        let mut raw = Vec::new();
        raw.try_reserve_exact(bytes).map_err(|_| too_large())?;

        let px = cell_px as usize;
        for y in 0..side as usize {
            let row = &self.cells[(y / px) * self.size..][..self.size];
            for x in 0..side as usize {
                raw.extend_from_slice(&row[x / px].0);
            }
        }
        ImageBuffer::from_raw(side, side, raw).ok_or_else(too_large)
    }

    /// Rebuild a grid from a raster made by [`Grid::to_raster_image`].
    ///
    /// Each cell takes the color of the pixel at the center of its block.
    pub fn from_raster_image(image: &RgbaImage, cell_px: u32) -> Result<Self, GridError> {
        if cell_px == 0 {
            return Err(GridError::dimension("cell pixel size", 0));
        }
        let (width, height) = image.dimensions();
        if width != height {
            return Err(GridError::dimension("image height", height as usize));
        }
        if width == 0 || width % cell_px != 0 {
            return Err(GridError::dimension("image width", width as usize));
        }

        let size = (width / cell_px) as usize;
        let half = cell_px / 2;
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size as u32 {
            for col in 0..size as u32 {
                cells.push(*image.get_pixel(col * cell_px + half, row * cell_px + half));
            }
        }
        Ok(Grid { size, cells })
    }
}
