//! JSON sidecar describing how a poster was laid out.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PosterError, Result};
use crate::layout::{GridDimensions, LayoutPolicy};

/// Layout facts for one rendered poster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderMeta {
    pub grid: GridDimensions,
    pub characters: usize,
    pub files: usize,
    pub layout: LayoutPolicy,
    pub font_size: u32,
    pub cell_pitch: f32,
    pub canvas: CanvasSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for CanvasSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Sidecar path for an output image: `poster.png` -> `poster.png.json`.
pub fn meta_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".json");
    PathBuf::from(name)
}

/// Layout metadata as pretty-printed JSON.
pub fn meta_json(meta: &RenderMeta) -> Result<String> {
    serde_json::to_string_pretty(meta).map_err(|e| PosterError::Encode {
        message: format!("Failed to serialize layout metadata: {}", e),
    })
}

/// Write already encoded layout metadata to `path`.
pub fn write_meta(json: &str, path: &Path) -> Result<()> {
    fs::write(path, json).map_err(|e| PosterError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write layout metadata: {}", e),
    })
}
