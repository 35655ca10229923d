//! Grid layout planning.
//!
//! Chooses how many cells wide and tall the mosaic is for a given
//! character count.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PosterError;

/// Target aspect ratio for [`LayoutPolicy::Stretch`].
const STRETCH_ASPECT: f64 = 16.0 / 9.0;

/// How the grid aspect ratio is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPolicy {
    /// Wide grid biased toward 16:9.
    #[default]
    Stretch,
    /// Near-square grid.
    Square,
}

impl fmt::Display for LayoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutPolicy::Stretch => f.write_str("stretch"),
            LayoutPolicy::Square => f.write_str("square"),
        }
    }
}

impl FromStr for LayoutPolicy {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stretch" => Ok(LayoutPolicy::Stretch),
            "square" => Ok(LayoutPolicy::Square),
            other => Err(PosterError::Config {
                message: format!("Unknown layout policy: {}", other),
                help: Some("Use 'stretch' or 'square'".to_string()),
            }),
        }
    }
}

/// Grid size in cells. Always at least 1x1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    /// Plan a grid that holds `len` characters.
    ///
    /// - `Stretch`: `width = ceil(sqrt(len) * 16/9)`, `height = ceil(len / width)`
    /// - `Square`: `width = height = ceil(sqrt(len))`
    ///
    /// `width * height >= len` always holds. An empty text plans a 1x1 grid.
    pub fn plan(len: usize, policy: LayoutPolicy) -> Self {
        let root = (len as f64).sqrt();

        match policy {
            LayoutPolicy::Stretch => {
                let width = ((root * STRETCH_ASPECT).ceil() as usize).max(1);
                let height = len.div_ceil(width).max(1);
                Self::from_usize(width, height)
            }
            LayoutPolicy::Square => {
                let mut side = (root.ceil() as usize).max(1);
                // Float rounding can land one short for very large counts.
                while side.saturating_mul(side) < len {
                    side += 1;
                }
                Self::from_usize(side, side)
            }
        }
    }

    fn from_usize(width: usize, height: usize) -> Self {
        Self {
            width: u32::try_from(width).unwrap_or(u32::MAX),
            height: u32::try_from(height).unwrap_or(u32::MAX),
        }
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Cell coordinates of the character at sequence index `index`.
    pub fn position(&self, index: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((index % width) as u32, (index / width) as u32)
    }
}

impl fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
