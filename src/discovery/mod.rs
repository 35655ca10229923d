//! Corpus discovery and poster configuration.
//!
//! Finds the source files that make up a poster and loads the optional
//! `codeposter.yaml` configuration.
//!
//! # Example
//!
//! ```ignore
//! use codeposter::discovery::{aggregate, PosterConfig};
//!
//! let config = PosterConfig::default();
//! let corpus = aggregate(Path::new("./my-project"), "*.rs", &config)?;
//! println!("Read {} files", corpus.files.len());
//! ```

mod config;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use config::{PosterConfig, DEFAULT_EXCLUDES, DEFAULT_FONT_SIZE, DEFAULT_SKIP_FILES};
pub use scanner::{aggregate, matches_glob, Corpus};

/// The name of the configuration file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "codeposter.yaml";

/// Load configuration.
///
/// An explicit path must exist. Without one, `codeposter.yaml` in `dir` is
/// used when present, otherwise the defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<(PosterConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((PosterConfig::load(path)?, Some(path.to_path_buf())));
    }

    let candidate = dir.join(CONFIG_FILENAME);
    if candidate.is_file() {
        Ok((PosterConfig::load(&candidate)?, Some(candidate)))
    } else {
        Ok((PosterConfig::default(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosterError;
    use crate::layout::LayoutPolicy;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_defaults_without_file() {
        let dir = tempdir().unwrap();

        let (config, source) = load_config(None, dir.path()).unwrap();

        assert_eq!(config, PosterConfig::default());
        assert!(source.is_none());
    }

    #[test]
    fn test_load_config_from_working_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "layout: square\n").unwrap();

        let (config, source) = load_config(None, dir.path()).unwrap();

        assert_eq!(config.layout, LayoutPolicy::Square);
        assert_eq!(source, Some(dir.path().join(CONFIG_FILENAME)));
    }

    #[test]
    fn test_load_config_explicit_path_wins() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "font_size: 10\n").unwrap();
        let explicit = dir.path().join("other.yaml");
        fs::write(&explicit, "font_size: 30\n").unwrap();

        let (config, _) = load_config(Some(&explicit), dir.path()).unwrap();

        assert_eq!(config.font_size, 30);
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let dir = tempdir().unwrap();

        let result = load_config(Some(&dir.path().join("missing.yaml")), dir.path());

        assert!(matches!(result, Err(PosterError::Io { .. })));
    }
}
