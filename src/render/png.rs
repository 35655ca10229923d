//! PNG output for rendered posters.
//!
//! The image is encoded in memory first so a failed encode never leaves a
//! partial file behind.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageError, ImageFormat, RgbImage};

use crate::error::{PosterError, Result};

/// Encode a canvas as PNG bytes.
pub fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(encode_error)?;
    Ok(bytes)
}

fn encode_error(e: ImageError) -> PosterError {
    PosterError::Encode {
        message: format!("Failed to encode PNG: {}", e),
    }
}

/// Encode a canvas and write it to `path` in one step.
pub fn write_png(canvas: &RgbImage, path: &Path) -> Result<()> {
    let bytes = encode_png(canvas)?;

    fs::write(path, bytes).map_err(|e| PosterError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}
