//! File system scanner that gathers the source corpus.
//!
//! Recursively walks the source root, prunes excluded directories and reads
//! every file whose name matches the glob pattern.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{PosterError, Result};

use super::config::PosterConfig;

/// Concatenated source text and the files it came from.
#[derive(Debug, Default)]
pub struct Corpus {
    pub text: String,
    pub files: Vec<PathBuf>,
}

impl Corpus {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Read every file under `root` whose name matches `pattern`.
///
/// Entries are visited in file-name order so the corpus is stable across
/// runs. File contents are decoded as UTF-8, replacing invalid sequences.
pub fn aggregate(root: &Path, pattern: &str, config: &PosterConfig) -> Result<Corpus> {
    if !root.is_dir() {
        return Err(PosterError::Io {
            path: root.to_path_buf(),
            message: "Source root is not a readable directory".to_string(),
        });
    }

    let mut corpus = Corpus::default();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry, root, config));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if is_stale_entry(&e, pattern, config) => continue,
            Err(e) => {
                return Err(PosterError::Io {
                    path: e.path().unwrap_or(root).to_path_buf(),
                    message: format!("Failed to scan directory: {}", e),
                })
            }
        };

        if !entry.file_type().is_file() || !is_source_file(entry.path(), pattern, config) {
            continue;
        }

        let bytes = fs::read(entry.path()).map_err(|e| PosterError::Io {
            path: entry.path().to_path_buf(),
            message: format!("Failed to read file: {}", e),
        })?;
        corpus.text.push_str(&String::from_utf8_lossy(&bytes));
        corpus.files.push(entry.into_path());
    }

    Ok(corpus)
}

/// Walk errors below the root that cannot hide source text: dangling links
/// and entries that are neither directories nor matching files.
///
/// Symlink loops and unreadable directories still fail the scan.
fn is_stale_entry(error: &walkdir::Error, pattern: &str, config: &PosterConfig) -> bool {
    if error.depth() == 0 || error.loop_ancestor().is_some() {
        return false;
    }
    if error
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
    {
        return true;
    }
    error
        .path()
        .is_some_and(|path| !path.is_dir() && !is_source_file(path, pattern, config))
}

/// Directories whose path below the root contains an exclude fragment.
fn is_excluded_dir(entry: &DirEntry, root: &Path, config: &PosterConfig) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    let relative = relative.to_string_lossy();
    config
        .excludes
        .iter()
        .any(|fragment| relative.contains(fragment.as_str()))
}

/// Files matching the glob by name and containing no skip fragment.
fn is_source_file(path: &Path, pattern: &str, config: &PosterConfig) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if !matches_glob(pattern, name) {
        return false;
    }
    let path_str = path.to_string_lossy();
    !config
        .skip_files
        .iter()
        .any(|fragment| path_str.contains(fragment.as_str()))
}

/// Match a file name against a glob: `*` is any run, `?` is one character.
pub fn matches_glob(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0, 0);
    // Position after the last `*` and the name index it was tried against.
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p + 1, n));
                p += 1;
            }
            Some(&c) if c == '?' || c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                Some((star_p, star_n)) => {
                    p = star_p;
                    n = star_n + 1;
                    backtrack = Some((star_p, star_n + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
