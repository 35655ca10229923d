//! codeposter - Source code mosaic poster generator
//!
//! A library for flattening a source tree into one dense character stream
//! and rendering it as a grid of glyphs tinted by a reference image.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod layout;
pub mod mosaic;
pub mod output;
pub mod render;
pub mod sanitize;
pub mod types;

pub use cli::build::render_poster;
pub use discovery::{aggregate, Corpus, PosterConfig};
pub use error::{PosterError, Result};
pub use layout::{GridDimensions, LayoutPolicy};
pub use mosaic::{compose, Cell, ColorSource, Mosaic, ResampleFilter};
pub use render::{render_mosaic, write_png, BitmapFont, GlyphBackend, RenderMeta};
pub use sanitize::{sanitize, SanitizedText};
pub use types::Colour;
