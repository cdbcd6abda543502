//! WASM API module for browser/JS interop
//!
//! Wraps an editing [`Session`] for a browser host. The host renders cells
//! itself; every mutating call hands back the cells it has to redraw.

use wasm_bindgen::prelude::*;

use crate::color::{parse_color, to_hex, Color};
use crate::grid::DEFAULT_GRID_SIZE;
use crate::import::import_image;
use crate::session::{Session, SessionOptions};
use crate::tools::{CellChange, Tool};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Pack a color as `0xRRGGBBAA`.
fn pack(color: Color) -> u32 {
    u32::from_be_bytes(color.0)
}

/// Flatten changes as `[row, col, rgba, row, col, rgba, ...]`.
fn flatten(changes: &[CellChange]) -> Vec<u32> {
    changes
        .iter()
        .flat_map(|c| [c.row as u32, c.col as u32, pack(c.color)])
        .collect()
}

/// Editor state for one browser page.
#[wasm_bindgen]
pub struct Editor {
    session: Session,
}

#[wasm_bindgen]
impl Editor {
    /// Create an editor with a `size`x`size` grid (0 means the default size).
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize) -> Result<Editor, String> {
        let grid_size = if size == 0 { DEFAULT_GRID_SIZE } else { size };
        let session = Session::new(SessionOptions { grid_size, ..Default::default() })
            .map_err(|e| e.to_string())?;
        Ok(Editor { session })
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.session.grid().size()
    }

    /// Name of the active tool
    #[wasm_bindgen(getter)]
    pub fn tool(&self) -> String {
        self.session.tool().name().to_string()
    }

    /// Activate a tool by name: "none", "pencil", "eraser" or "fill".
    pub fn set_tool(&mut self, name: &str) -> Result<(), String> {
        let tool: Tool = name.parse()?;
        self.session.select_tool(tool);
        Ok(())
    }

    /// Set the selected color from any CSS color string.
    pub fn set_color(&mut self, color: &str) -> Result<(), String> {
        let color = parse_color(color).map_err(|e| e.to_string())?;
        self.session.set_selected_color(color);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn color(&self) -> String {
        to_hex(self.session.selected_color())
    }

    /// Apply the active tool at (row, col).
    pub fn click(&mut self, row: usize, col: usize) -> Result<Vec<u32>, String> {
        let changes = self.session.click(row, col).map_err(|e| e.to_string())?;
        Ok(flatten(&changes))
    }

    /// Hex color of one cell
    pub fn get_cell(&self, row: usize, col: usize) -> Result<String, String> {
        self.session.grid().get(row, col).map(to_hex).map_err(|e| e.to_string())
    }

    /// Palette colors, background first
    pub fn palette(&self) -> Vec<String> {
        self.session.palette().colors().iter().map(|c| to_hex(*c)).collect()
    }

    /// Click on swatch `index`; returns the swatch's new color.
    pub fn click_swatch(&mut self, index: usize) -> Result<String, String> {
        self.session.click_swatch(index).map(to_hex).map_err(|e| e.to_string())
    }

    /// Reset the grid at a new size.
    pub fn resize(&mut self, size: usize) -> Result<(), String> {
        self.session.set_grid_size(size).map_err(|e| e.to_string())
    }

    pub fn set_eraser_size(&mut self, size: usize) -> Result<(), String> {
        self.session.set_eraser_size(size).map_err(|e| e.to_string())
    }

    /// All cells as packed `0xRRGGBBAA`, row-major
    pub fn cells(&self) -> Vec<u32> {
        self.session.grid().cells().iter().map(|c| pack(*c)).collect()
    }

    /// PNG bytes of the grid at `cell_px` pixels per cell.
    pub fn export_png(&self, cell_px: u32) -> Result<Vec<u8>, String> {
        self.session.export_png(cell_px).map_err(|e| e.to_string())
    }
}

/// Re-encode an uploaded image as PNG. The grid is not changed.
#[wasm_bindgen]
pub fn import_png(bytes: &[u8]) -> Result<Vec<u8>, String> {
    import_image(bytes).map(|image| image.png).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_editor_defaults() {
        let editor = Editor::new(0).unwrap();
        assert_eq!(editor.size(), 16);
        assert_eq!(editor.tool(), "none");
        assert_eq!(editor.color(), "#000000");
        assert_eq!(editor.cells().len(), 256);
        assert!(editor.cells().iter().all(|c| *c == 0xffffffff));
    }

    #[test]
    fn test_pencil_click_reports_packed_change() {
        let mut editor = Editor::new(4).unwrap();
        editor.set_tool("pencil").unwrap();
        editor.set_color("red").unwrap();
        assert_eq!(editor.click(1, 2).unwrap(), vec![1, 2, 0xff0000ff]);
        assert_eq!(editor.get_cell(1, 2).unwrap(), "#ff0000");
    }

    #[test]
    fn test_fill_reports_every_cell() {
        let mut editor = Editor::new(3).unwrap();
        editor.set_tool("fill").unwrap();
        let flat = editor.click(0, 0).unwrap();
        assert_eq!(flat.len(), 9 * 3);
        assert!(editor.cells().iter().all(|c| *c == 0x000000ff));
    }

    #[test]
    fn test_errors_are_strings() {
        let mut editor = Editor::new(2).unwrap();
        assert!(editor.set_tool("brush").is_err());
        assert!(editor.set_color("#12").is_err());
        assert!(editor.click(2, 0).is_err());
        assert!(editor.resize(0).is_err());
        assert_eq!(editor.size(), 2);
    }

    #[test]
    fn test_swatch_rotates_palette() {
        let mut editor = Editor::new(2).unwrap();
        assert_eq!(editor.click_swatch(0).unwrap(), "#00ff00");
        assert_eq!(editor.palette()[0], "#00ff00");
    }

    #[test]
    fn test_export_png() {
        let editor = Editor::new(2).unwrap();
        let png = editor.export_png(5).unwrap();
        assert_eq!(&png[0..4], &[0x89, 0x50, 0x4E, 0x47]);
        assert!(editor.export_png(0).is_err());
    }

    #[test]
    fn test_import_png_rejects_garbage() {
        assert!(import_png(b"not an image").is_err());
    }
}
