//! Mosaic composition.
//!
//! Walks the sanitized text in row-major order and pairs every character
//! with the colour of the reference pixel under it.

mod source;

pub use source::{load_image, ColorSource, ResampleFilter};

use crate::error::{PosterError, Result};
use crate::layout::GridDimensions;
use crate::sanitize::SanitizedText;
use crate::types::Colour;

/// A filled grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub colour: Colour,
}

/// Grid of cells, row-major. Cells past the end of the text are `None`.
#[derive(Debug, Clone)]
pub struct Mosaic {
    dims: GridDimensions,
    cells: Vec<Option<Cell>>,
}

impl Mosaic {
    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        if x >= self.dims.width || y >= self.dims.height {
            return None;
        }
        let index = y as usize * self.dims.width as usize + x as usize;
        self.cells[index].as_ref()
    }

    /// Filled cells with their coordinates, in row-major order.
    pub fn filled(&self) -> impl Iterator<Item = (u32, u32, &Cell)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            let (x, y) = self.dims.position(index);
            cell.as_ref().map(|cell| (x, y, cell))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Lay `text` onto a grid coloured by `source`.
///
/// Fails with [`PosterError::Layout`] if the text does not fit the grid or
/// the colour source was resampled to different dimensions.
pub fn compose(text: &SanitizedText, dims: GridDimensions, source: &ColorSource) -> Result<Mosaic> {
    if source.dimensions() != dims {
        return Err(PosterError::Layout {
            message: format!(
                "colour source is {} but the grid is {}",
                source.dimensions(),
                dims
            ),
        });
    }
    if text.len() > dims.area() {
        return Err(PosterError::Layout {
            message: format!(
                "{} characters do not fit a {} grid ({} cells)",
                text.len(),
                dims,
                dims.area()
            ),
        });
    }

    let mut cells = vec![None; dims.area()];
    let (mut x, mut y) = (0u32, 0u32);

    for (index, ch) in text.chars().enumerate() {
        let colour = source.colour_at(x, y).ok_or_else(|| PosterError::Layout {
            message: format!("cell ({}, {}) is outside the colour source", x, y),
        })?;
        cells[index] = Some(Cell { ch, colour });

        x += 1;
        if x == dims.width {
            x = 0;
            y += 1;
        }
    }

    Ok(Mosaic { dims, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutPolicy;
    use crate::sanitize::sanitize;
    use image::{DynamicImage, Rgb, RgbImage};

    /// Every pixel encodes its own coordinates so placement is checkable.
    fn gradient_source(dims: GridDimensions) -> ColorSource {
        let image = RgbImage::from_fn(dims.width, dims.height, |x, y| Rgb([x as u8, y as u8, 7]));
        ColorSource::from_image(&DynamicImage::ImageRgb8(image), dims, ResampleFilter::Nearest)
            .unwrap()
    }

    #[test]
    fn test_row_major_placement() {
        let text = sanitize("abcde");
        let dims = GridDimensions::plan(text.len(), LayoutPolicy::Stretch);
        assert_eq!(dims, GridDimensions { width: 4, height: 2 });

        let mosaic = compose(&text, dims, &gradient_source(dims)).unwrap();

        let placed: Vec<(u32, u32, char)> = mosaic.filled().map(|(x, y, c)| (x, y, c.ch)).collect();
        assert_eq!(
            placed,
            vec![(0, 0, 'a'), (1, 0, 'b'), (2, 0, 'c'), (3, 0, 'd'), (0, 1, 'e')]
        );
        assert!(mosaic.get(1, 1).is_none());
        assert!(mosaic.get(3, 1).is_none());
        assert!(mosaic.get(4, 0).is_none());
    }

    #[test]
    fn test_colours_match_source_pixels() {
        let text = sanitize(&"x".repeat(37));
        for policy in [LayoutPolicy::Stretch, LayoutPolicy::Square] {
            let dims = GridDimensions::plan(text.len(), policy);
            let source = gradient_source(dims);
            let mosaic = compose(&text, dims, &source).unwrap();

            assert_eq!(mosaic.filled_count(), text.len().min(dims.area()));
            for (x, y, cell) in mosaic.filled() {
                assert_eq!(Some(cell.colour), source.colour_at(x, y));
                assert_eq!(cell.colour, Colour::rgb(x as u8, y as u8, 7));
            }
        }
    }

    #[test]
    fn test_empty_text_fills_nothing() {
        let text = sanitize("");
        let dims = GridDimensions::plan(0, LayoutPolicy::Stretch);
        let mosaic = compose(&text, dims, &gradient_source(dims)).unwrap();
        assert_eq!(mosaic.filled_count(), 0);
        assert!(mosaic.get(0, 0).is_none());
    }

    #[test]
    fn test_multibyte_chars_take_one_cell_each() {
        let text = sanitize("été");
        let dims = GridDimensions { width: 3, height: 1 };
        let mosaic = compose(&text, dims, &gradient_source(dims)).unwrap();
        assert_eq!(mosaic.get(0, 0).map(|c| c.ch), Some('é'));
        assert_eq!(mosaic.get(2, 0).map(|c| c.ch), Some('é'));
    }

    #[test]
    fn test_overflow_is_layout_error() {
        let text = sanitize("abcdef");
        let dims = GridDimensions { width: 2, height: 2 };
        let result = compose(&text, dims, &gradient_source(dims));
        assert!(matches!(result, Err(PosterError::Layout { .. })));
    }

    #[test]
    fn test_mismatched_source_is_layout_error() {
        let text = sanitize("abc");
        let dims = GridDimensions { width: 2, height: 2 };
        let other = GridDimensions { width: 3, height: 1 };
        let result = compose(&text, dims, &gradient_source(other));
        assert!(matches!(result, Err(PosterError::Layout { .. })));
    }
}
