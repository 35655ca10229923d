pub mod build;

use std::path::PathBuf;

use clap::Parser;

use crate::layout::LayoutPolicy;
use crate::mosaic::ResampleFilter;

/// codeposter - Render a source tree as a colour-tinted text mosaic
///
/// Every character of the sanitized sources becomes one glyph, coloured by
/// the matching pixel of the input image.
#[derive(Parser, Debug, Default)]
#[command(name = "codeposter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan for sources
    #[arg(value_name = "SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// File name pattern, e.g. '*.rs'
    #[arg(value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Reference image that colours the mosaic
    #[arg(value_name = "INPUT_IMAGE")]
    pub input_image: Option<PathBuf>,

    /// Output PNG path
    #[arg(value_name = "OUTPUT_IMAGE")]
    pub output_image: Option<PathBuf>,

    /// Glyph height in pixels [default: 18]
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Black background instead of white
    #[arg(long)]
    pub invert: bool,

    /// Grid aspect policy [default: stretch]
    #[arg(long, value_enum)]
    pub layout: Option<LayoutPolicy>,

    /// Filter used to resample the input image [default: catmull-rom]
    #[arg(long, value_enum)]
    pub filter: Option<ResampleFilter>,

    /// Configuration file (default: ./codeposter.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also write layout metadata to <OUTPUT_IMAGE>.json
    #[arg(long)]
    pub meta: bool,

    /// Suppress status output
    #[arg(long, short)]
    pub quiet: bool,
}

/// Fully specified positional arguments.
#[derive(Debug, Clone)]
pub struct Targets {
    pub source_root: PathBuf,
    pub pattern: String,
    pub input_image: PathBuf,
    pub output_image: PathBuf,
}

impl Cli {
    /// The four positionals, or `None` if any is missing.
    pub fn targets(&self) -> Option<Targets> {
        Some(Targets {
            source_root: self.source_root.clone()?,
            pattern: self.pattern.clone()?,
            input_image: self.input_image.clone()?,
            output_image: self.output_image.clone()?,
        })
    }
}

/// Usage line printed when positionals are missing.
pub fn usage() -> String {
    let mut cmd = <Cli as clap::CommandFactory>::command();
    format!(
        "{}\n\nExample: codeposter ./project '*.cs' input.png poster.png",
        cmd.render_usage()
    )
}
