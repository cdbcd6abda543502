//! PNG encoding and file output

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use std::io;
use std::path::Path;

/// File name used when an export has no explicit destination.
pub const DEFAULT_OUTPUT: &str = "pixel_art.png";

/// Pixel size of one cell in exported images.
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// Error type for PNG export
#[derive(Debug)]
pub enum OutputError {
    /// Creating the parent directory or writing the file failed
    Io(io::Error),
    /// The encoder rejected the image
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "failed to write PNG: {}", e),
            OutputError::Image(e) => write!(f, "failed to encode PNG: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Encode an RGBA image as PNG bytes. Lossless, alpha preserved.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, OutputError> {
    let mut png_data = Vec::new();
    PngEncoder::new(&mut png_data).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(png_data)
}

/// Write PNG bytes to `path`, creating parent directories as needed.
pub fn write_png(png: &[u8], path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, png)?;
    Ok(())
}

/// Encode `image` and save it as a PNG file at `path`.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    let png = encode_png(image)?;
    write_png(&png, path)?;
    log::info!("wrote {}", path.display());
    Ok(())
}
