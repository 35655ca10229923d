//! Glyph drawing backends.
//!
//! The mosaic renderer only needs a glyph height and a way to paint one
//! character in one colour; [`GlyphBackend`] is that seam.

use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, LATIN_FONTS};
use image::RgbImage;

use crate::types::Colour;

/// Draws single characters onto a canvas.
pub trait GlyphBackend {
    /// Measured glyph height in pixels.
    fn glyph_height(&self) -> f32;

    /// Paint `ch` in `colour` with its top-left corner at `(x, y)`.
    ///
    /// Pixels outside the canvas are clipped. Glyph pixels replace what is
    /// under them; there is no blending.
    fn draw(&self, canvas: &mut RgbImage, ch: char, x: f32, y: f32, colour: Colour);
}

/// Built-in 8x8 bitmap font scaled to a pixel size.
///
/// Characters without a bitmap fall back to `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    size: u32,
    bold: bool,
}

impl BitmapFont {
    /// Font rendering glyphs `size` pixels tall, emboldened.
    pub fn new(size: u32) -> Self {
        Self {
            size: size.max(1),
            bold: true,
        }
    }

    pub fn regular(mut self) -> Self {
        self.bold = false;
        self
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

impl GlyphBackend for BitmapFont {
    fn glyph_height(&self) -> f32 {
        self.size as f32
    }

    fn draw(&self, canvas: &mut RgbImage, ch: char, x: f32, y: f32, colour: Colour) {
        let Some(rows) = bitmap(ch) else {
            return;
        };
        let origin_x = x.round() as i64;
        let origin_y = y.round() as i64;
        let size = self.size as usize;
        let pixel = colour.to_rgb();

        for gy in 0..size {
            let row = rows[gy * 8 / size];
            if row == 0 {
                continue;
            }
            for gx in 0..size {
                if row >> (gx * 8 / size) & 1 == 0 {
                    continue;
                }
                let py = origin_y + gy as i64;
                let px = origin_x + gx as i64;
                put(canvas, px, py, pixel);
                if self.bold {
                    put(canvas, px + 1, py, pixel);
                }
            }
        }
    }
}

/// Look up the 8x8 bitmap for `ch`, falling back to `?`.
fn bitmap(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
        .or_else(|| BOX_FONTS.get(ch))
        .or_else(|| BLOCK_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
}

fn put(canvas: &mut RgbImage, x: i64, y: i64, pixel: image::Rgb<u8>) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    canvas.put_pixel(x as u32, y as u32, pixel);
}
