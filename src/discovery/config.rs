//! Poster configuration (codeposter.yaml) parsing.
//!
//! Every field is optional; command-line flags override what the file sets.

use std::path::Path;

use serde::Deserialize;

use crate::error::{PosterError, Result};
use crate::layout::LayoutPolicy;
use crate::mosaic::ResampleFilter;
use crate::types::Colour;

/// Directory fragments skipped while scanning.
pub const DEFAULT_EXCLUDES: &[&str] = &[".git", ".idea", "node_modules"];

/// File path fragments skipped while scanning.
pub const DEFAULT_SKIP_FILES: &[&str] = &[".d.ts"];

pub const DEFAULT_FONT_SIZE: u32 = 18;

/// Configuration loaded from codeposter.yaml.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PosterConfig {
    /// Glyph height in pixels.
    pub font_size: u32,

    /// Black background instead of white.
    pub invert: bool,

    pub layout: LayoutPolicy,

    /// Explicit background colour; overrides `invert`.
    pub background: Option<Colour>,

    /// Filter used to resample the reference image.
    pub filter: ResampleFilter,

    /// Directories whose path contains any of these are not scanned.
    pub excludes: Vec<String>,

    /// Files whose path contains any of these are not read.
    pub skip_files: Vec<String>,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            invert: false,
            layout: LayoutPolicy::default(),
            background: None,
            filter: ResampleFilter::default(),
            excludes: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            skip_files: DEFAULT_SKIP_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PosterConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PosterError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| PosterError::Config {
            message: format!("Invalid config: {}", e),
            help: Some("Check codeposter.yaml syntax".to_string()),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.font_size == 0 {
            return Err(PosterError::Config {
                message: "font_size must be at least 1".to_string(),
                help: None,
            });
        }
        Ok(())
    }

    /// Canvas background: the explicit colour, else white or black.
    pub fn background_colour(&self) -> Colour {
        self.background
            .unwrap_or_else(|| Colour::background(self.invert))
    }
}
