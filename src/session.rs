//! Editing session: all editor state for one host, passed explicitly.
//!
//! A host (the CLI, a browser binding, a test) owns a [`Session`] and feeds it
//! interactions. The session dispatches clicks to the active tool and hands
//! back the cells that need re-rendering.

use image::RgbaImage;
use thiserror::Error;

use crate::color::{parse_color, Color, ColorError, BLACK};
use crate::error::GridError;
use crate::grid::{Grid, DEFAULT_GRID_SIZE};
use crate::output::{encode_png, OutputError};
use crate::palette::{Palette, PaletteError};
use crate::script::Event;
use crate::tools::{CellChange, Tool, ToolContext};

/// Error type for session operations
#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error("invalid color: {0}")]
    Color(#[from] ColorError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Initial settings for a new session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub grid_size: usize,
    pub eraser_size: usize,
    pub palette: Palette,
    pub selected_color: Color,
    pub tool: Tool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            eraser_size: 1,
            palette: Palette::default(),
            selected_color: BLACK,
            tool: Tool::None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    palette: Palette,
    tool: Tool,
    selected_color: Color,
    eraser_size: usize,
}

impl Session {
    pub fn new(options: SessionOptions) -> Result<Self, EditError> {
        if options.eraser_size == 0 {
            return Err(GridError::dimension("eraser size", 0).into());
        }
        let grid = Grid::new(options.grid_size, options.palette.background())?;
        Ok(Session {
            grid,
            palette: options.palette,
            tool: options.tool,
            selected_color: options.selected_color,
            eraser_size: options.eraser_size,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn selected_color(&self) -> Color {
        self.selected_color
    }

    pub fn eraser_size(&self) -> usize {
        self.eraser_size
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Color picker input. The palette is not touched.
    pub fn set_selected_color(&mut self, color: Color) {
        self.selected_color = color;
    }

    /// Select a palette color and move it to the front of the palette.
    pub fn use_palette_color(&mut self, index: usize) -> Result<Color, EditError> {
        let color = self.palette.get(index)?;
        self.palette.promote(color);
        self.selected_color = color;
        Ok(color)
    }

    /// A click on swatch `index`: the palette rotates last-to-front and the
    /// swatch shows the new front color, which is returned.
    ///
    /// The background (and so the eraser color) rotates along with it.
    pub fn click_swatch(&mut self, index: usize) -> Result<Color, EditError> {
        self.palette.get(index)?;
        self.palette.rotate();
        Ok(self.palette.background())
    }

    /// Reset the grid at a new size, every cell set to the background.
    pub fn set_grid_size(&mut self, size: usize) -> Result<(), EditError> {
        self.grid.resize(size, self.palette.background())?;
        log::info!("grid reset to {}x{}", size, size);
        Ok(())
    }

    pub fn set_eraser_size(&mut self, size: usize) -> Result<(), EditError> {
        if size == 0 {
            return Err(GridError::dimension("eraser size", size).into());
        }
        self.eraser_size = size;
        Ok(())
    }

    fn tool_context(&self) -> ToolContext {
        ToolContext {
            color: self.selected_color,
            background: self.palette.background(),
            eraser_size: self.eraser_size,
        }
    }

    /// The user interacted with cell (row, col).
    pub fn click(&mut self, row: usize, col: usize) -> Result<Vec<CellChange>, EditError> {
        let ctx = self.tool_context();
        Ok(self.tool.apply(&mut self.grid, row, col, &ctx)?)
    }

    /// Render the grid with `cell_px`-sized blocks.
    pub fn export_image(&self, cell_px: u32) -> Result<RgbaImage, EditError> {
        Ok(self.grid.to_raster_image(cell_px)?)
    }

    /// Render and PNG-encode the grid.
    pub fn export_png(&self, cell_px: u32) -> Result<Vec<u8>, EditError> {
        let image = self.export_image(cell_px)?;
        let png = encode_png(&image)?;
        log::info!(
            "exported {}x{} image ({} bytes)",
            image.width(),
            image.height(),
            png.len()
        );
        Ok(png)
    }

    /// Apply one scripted interaction. Returns the cells that changed; a
    /// resize reports every cell.
    pub fn apply_event(&mut self, event: &Event) -> Result<Vec<CellChange>, EditError> {
        match event {
            Event::Tool { tool } => {
                self.select_tool(*tool);
                Ok(Vec::new())
            }
            Event::Color { color } => {
                self.set_selected_color(parse_color(color)?);
                Ok(Vec::new())
            }
            Event::Click { row, col } => self.click(*row, *col),
            Event::Resize { size } => {
                self.set_grid_size(*size)?;
                let background = self.palette.background();
                let n = self.grid.size();
                Ok((0..n * n)
                    .map(|i| CellChange { row: i / n, col: i % n, color: background })
                    .collect())
            }
            Event::Eraser { size } => {
                self.set_eraser_size(*size)?;
                Ok(Vec::new())
            }
            Event::Swatch { index } => {
                self.click_swatch(*index)?;
                Ok(Vec::new())
            }
            Event::Pick { index } => {
                self.use_palette_color(*index)?;
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITE;
    use image::Rgba;

    const RED: Color = Rgba([255, 0, 0, 255]);

    fn new_session() -> Session {
        Session::new(SessionOptions::default()).unwrap()
    }

    #[test]
    fn test_default_session() {
        let session = new_session();
        assert_eq!(session.grid().size(), 16);
        assert_eq!(session.tool(), Tool::None);
        assert_eq!(session.selected_color(), BLACK);
        assert_eq!(session.eraser_size(), 1);
        assert!(session.grid().cells().iter().all(|c| *c == WHITE));
    }

    #[test]
    fn test_new_rejects_bad_options() {
        let opts = SessionOptions { grid_size: 0, ..Default::default() };
        assert!(matches!(Session::new(opts), Err(EditError::Grid(_))));
        let opts = SessionOptions { eraser_size: 0, ..Default::default() };
        assert!(matches!(Session::new(opts), Err(EditError::Grid(_))));
    }

    #[test]
    fn test_click_uses_active_tool() {
        let mut session = new_session();
        assert!(session.click(0, 0).unwrap().is_empty());

        session.select_tool(Tool::Pencil);
        session.set_selected_color(RED);
        assert_eq!(session.click(0, 0).unwrap().len(), 1);
        assert_eq!(session.grid().get(0, 0), Ok(RED));

        session.select_tool(Tool::Eraser);
        session.click(0, 0).unwrap();
        assert_eq!(session.grid().get(0, 0), Ok(WHITE));

        session.select_tool(Tool::Fill);
        assert_eq!(session.click(5, 5).unwrap().len(), 256);
    }

    #[test]
    fn test_click_out_of_bounds_leaves_grid() {
        let mut session = new_session();
        session.select_tool(Tool::Fill);
        let err = session.click(16, 0).unwrap_err();
        assert!(matches!(err, EditError::Grid(GridError::IndexOutOfBounds { .. })));
        assert!(session.grid().cells().iter().all(|c| *c == WHITE));
    }

    #[test]
    fn test_set_grid_size_resets() {
        let mut session = new_session();
        session.select_tool(Tool::Pencil);
        session.click(1, 1).unwrap();
        session.set_grid_size(4).unwrap();
        assert_eq!(session.grid().size(), 4);
        assert!(session.grid().cells().iter().all(|c| *c == WHITE));
        assert!(session.set_grid_size(0).is_err());
        assert_eq!(session.grid().size(), 4);
    }

    #[test]
    fn test_eraser_size_validation() {
        let mut session = new_session();
        assert!(session.set_eraser_size(0).is_err());
        session.set_eraser_size(5).unwrap();
        assert_eq!(session.eraser_size(), 5);
    }

    #[test]
    fn test_click_swatch_rotates_background() {
        let mut session = new_session();
        let shown = session.click_swatch(2).unwrap();
        assert_eq!(shown, Rgba([0, 255, 0, 255]));
        assert_eq!(session.palette().background(), shown);
        assert_eq!(session.selected_color(), BLACK);

        // Eraser now paints the rotated background
        session.select_tool(Tool::Eraser);
        session.click(0, 0).unwrap();
        assert_eq!(session.grid().get(0, 0), Ok(shown));

        assert!(matches!(session.click_swatch(9), Err(EditError::Palette(_))));
    }

    #[test]
    fn test_use_palette_color_promotes() {
        let mut session = new_session();
        let color = session.use_palette_color(2).unwrap();
        assert_eq!(color, RED);
        assert_eq!(session.selected_color(), RED);
        assert_eq!(session.palette().background(), RED);
    }

    #[test]
    fn test_apply_events() {
        let mut session = new_session();
        session.apply_event(&Event::Resize { size: 3 }).unwrap();
        session.apply_event(&Event::Tool { tool: Tool::Fill }).unwrap();
        session.apply_event(&Event::Color { color: "#ff0000".to_string() }).unwrap();
        let changes = session.apply_event(&Event::Click { row: 1, col: 1 }).unwrap();
        assert_eq!(changes.len(), 9);
        assert!(session.grid().cells().iter().all(|c| *c == RED));

        let err = session.apply_event(&Event::Color { color: "nope".to_string() }).unwrap_err();
        assert!(matches!(err, EditError::Color(_)));
        assert_eq!(session.selected_color(), RED);
    }

    #[test]
    fn test_resize_event_reports_all_cells() {
        let mut session = new_session();
        let changes = session.apply_event(&Event::Resize { size: 2 }).unwrap();
        assert_eq!(changes.len(), 4);
        assert!(changes.iter().all(|c| c.color == WHITE));
    }

    #[test]
    fn test_export_png() {
        let mut session = new_session();
        session.set_grid_size(2).unwrap();
        let image = session.export_image(20).unwrap();
        assert_eq!(image.dimensions(), (40, 40));
        let png = session.export_png(20).unwrap();
        assert_eq!(&png[0..4], &[0x89, 0x50, 0x4E, 0x47]);
        assert!(session.export_png(0).is_err());
    }
}
