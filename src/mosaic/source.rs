//! Reference image loading and resampling.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, ImageReader, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};
use crate::layout::GridDimensions;
use crate::types::Colour;

/// Resampling filter used when shrinking the reference image to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    /// Bicubic; the default.
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Reference image resampled to exactly one pixel per grid cell.
///
/// Alpha is discarded.
#[derive(Debug, Clone)]
pub struct ColorSource {
    pixels: RgbImage,
}

impl ColorSource {
    /// Load an image from disk and resample it to `dims`.
    pub fn open(path: &Path, dims: GridDimensions, filter: ResampleFilter) -> Result<Self> {
        let image = load_image(path)?;
        Self::from_image(&image, dims, filter).map_err(|e| match e {
            PosterError::Decode { message, .. } => PosterError::Decode {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Resample an already decoded image to `dims`.
    pub fn from_image(
        image: &DynamicImage,
        dims: GridDimensions,
        filter: ResampleFilter,
    ) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(PosterError::Decode {
                path: Default::default(),
                message: "image has no pixels".to_string(),
            });
        }

        let rgb = image.to_rgb8();
        let pixels = imageops::resize(&rgb, dims.width, dims.height, filter.into());
        Ok(Self { pixels })
    }

    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions {
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }

    /// Colour of the cell at `(x, y)`, or `None` outside the grid.
    pub fn colour_at(&self, x: u32, y: u32) -> Option<Colour> {
        self.pixels.get_pixel_checked(x, y).map(|p| Colour::from(*p))
    }
}

/// Decode an image, keeping I/O failures apart from format failures.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let io_error = |e: std::io::Error| PosterError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read image: {}", e),
    };

    let reader = ImageReader::open(path)
        .map_err(io_error)?
        .with_guessed_format()
        .map_err(io_error)?;

    reader.decode().map_err(|e| match e {
        ImageError::IoError(e) => io_error(e),
        other => PosterError::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    fn solid(width: u32, height: u32, colour: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(colour)))
    }

    #[test]
    fn test_resize_to_grid() {
        let dims = GridDimensions { width: 18, height: 6 };
        let source =
            ColorSource::from_image(&solid(100, 40, [10, 20, 30]), dims, ResampleFilter::default())
                .unwrap();
        assert_eq!(source.dimensions(), dims);
    }

    #[test]
    fn test_every_cell_is_readable() {
        let dims = GridDimensions { width: 7, height: 3 };
        let source =
            ColorSource::from_image(&solid(2, 2, [1, 2, 3]), dims, ResampleFilter::Lanczos3)
                .unwrap();

        for y in 0..dims.height {
            for x in 0..dims.width {
                assert!(source.colour_at(x, y).is_some(), "({x}, {y})");
            }
        }
        assert_eq!(source.colour_at(dims.width, 0), None);
        assert_eq!(source.colour_at(0, dims.height), None);
    }

    #[test]
    fn test_solid_colour_survives_upscale() {
        let dims = GridDimensions { width: 4, height: 2 };
        let source =
            ColorSource::from_image(&solid(2, 2, [255, 0, 0]), dims, ResampleFilter::Nearest)
                .unwrap();
        assert_eq!(source.colour_at(3, 1), Some(Colour::rgb(255, 0, 0)));
    }

    #[test]
    fn test_alpha_is_ignored() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([9, 8, 7, 0])));
        let dims = GridDimensions { width: 1, height: 1 };
        let source = ColorSource::from_image(&image, dims, ResampleFilter::Nearest).unwrap();
        assert_eq!(source.colour_at(0, 0), Some(Colour::rgb(9, 8, 7)));
    }

    #[test]
    fn test_empty_image_is_decode_error() {
        let dims = GridDimensions { width: 1, height: 1 };
        let result = ColorSource::from_image(&solid(0, 0, [0, 0, 0]), dims, ResampleFilter::Nearest);
        assert!(matches!(result, Err(PosterError::Decode { .. })));
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = load_image(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(PosterError::Io { .. })));
    }

    #[test]
    fn test_open_unknown_format_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.img");
        fs::write(&path, b"definitely not an image").unwrap();

        let result = load_image(&path);
        assert!(matches!(result, Err(PosterError::Decode { .. })));
    }

    #[test]
    fn test_open_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ref.png");
        solid(3, 3, [0, 128, 255]).save(&path).unwrap();

        let dims = GridDimensions { width: 5, height: 2 };
        let source = ColorSource::open(&path, dims, ResampleFilter::Nearest).unwrap();
        assert_eq!(source.dimensions(), dims);
        assert_eq!(source.colour_at(4, 1), Some(Colour::rgb(0, 128, 255)));
    }
}
