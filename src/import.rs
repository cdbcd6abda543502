//! Image import: re-encode an arbitrary raster image as PNG.
//!
//! Imported images are not loaded into the grid. The re-encoded bytes go to an
//! [`ImageSink`], the hook a host plugs its own storage into.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::output::{encode_png, write_png, OutputError};

/// Error type for image import
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Failed to encode image: {0}")]
    Encode(#[from] OutputError),
}

/// An imported image, re-encoded as RGBA PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Destination for imported images.
pub trait ImageSink {
    fn save(&mut self, image: &ImportedImage) -> Result<(), ImportError>;
}

/// Sink that only logs what it would have saved.
#[derive(Debug, Default)]
pub struct LogSink {
    pub saved: usize,
}

impl ImageSink for LogSink {
    fn save(&mut self, image: &ImportedImage) -> Result<(), ImportError> {
        self.saved += 1;
        log::info!(
            "imported {}x{} image ({} PNG bytes); no storage configured, nothing written",
            image.width,
            image.height,
            image.png.len()
        );
        Ok(())
    }
}

/// Sink that writes the PNG to a file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSink for FileSink {
    fn save(&mut self, image: &ImportedImage) -> Result<(), ImportError> {
        write_png(&image.png, &self.path)?;
        log::info!("saved imported image to {}", self.path.display());
        Ok(())
    }
}

/// Decode any supported image format and re-encode it as RGBA PNG.
///
/// Transparency in the source is preserved; sources without alpha come out
/// fully opaque.
pub fn import_image(bytes: &[u8]) -> Result<ImportedImage, ImportError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let png = encode_png(&rgba)?;
    Ok(ImportedImage { width: rgba.width(), height: rgba.height(), png })
}

/// Read an image file and re-encode it.
pub fn import_file(path: &Path) -> Result<ImportedImage, ImportError> {
    let bytes = std::fs::read(path)
        .map_err(|source| ImportError::Read { path: path.to_path_buf(), source })?;
    import_image(&bytes)
}

/// Import `bytes` and hand the result to `sink`.
pub fn import_into<S: ImageSink + ?Sized>(
    bytes: &[u8],
    sink: &mut S,
) -> Result<ImportedImage, ImportError> {
    let image = import_image(bytes)?;
    sink.save(&image)?;
    Ok(image)
}
