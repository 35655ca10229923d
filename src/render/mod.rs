//! Rendering module for codeposter.
//!
//! Paints a composed [`Mosaic`] onto a canvas, one glyph per filled cell,
//! and encodes the result.

mod glyph;
mod meta;
mod png;

pub use glyph::{BitmapFont, GlyphBackend};
pub use meta::{meta_json, meta_path, write_meta, CanvasSize, RenderMeta};
pub use png::{encode_png, write_png};

use image::RgbImage;

use crate::mosaic::Mosaic;
use crate::types::Colour;

/// Cell pitch as a fraction of the measured glyph height.
pub const PITCH_RATIO: f32 = 0.7;

/// Distance in pixels between neighbouring cell origins, on both axes.
pub fn cell_pitch(glyph_height: f32) -> f32 {
    glyph_height * PITCH_RATIO
}

/// Canvas size in pixels for a grid of `width` by `height` cells.
pub fn canvas_size(width: u32, height: u32, pitch: f32) -> (u32, u32) {
    let scale = |cells: u32| ((cells as f64 * pitch as f64).ceil() as u32).max(1);
    (scale(width), scale(height))
}

/// Render every filled cell of `mosaic` over a uniform `background`.
///
/// Cells past the end of the text are left as background.
pub fn render_mosaic(mosaic: &Mosaic, backend: &impl GlyphBackend, background: Colour) -> RgbImage {
    let dims = mosaic.dimensions();
    let pitch = cell_pitch(backend.glyph_height());
    let (width, height) = canvas_size(dims.width, dims.height, pitch);

    let mut canvas = RgbImage::from_pixel(width, height, background.to_rgb());

    for (x, y, cell) in mosaic.filled() {
        backend.draw(
            &mut canvas,
            cell.ch,
            x as f32 * pitch,
            y as f32 * pitch,
            cell.colour,
        );
    }

    canvas
}
