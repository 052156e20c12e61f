//! Running a correction over one file or a directory of files.

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::{CorrectionError, Result};

/// Only GOES-R products (`OR_*.nc`) are picked up from directories.
const FILE_PREFIX: &str = "OR_";
const FILE_EXTENSION: &str = ".nc";

/// A single file or every matching file directly inside a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Directory(PathBuf),
}

impl Target {
    /// Files to process, sorted by name.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        match self {
            Target::File(path) => {
                if path.is_file() {
                    Ok(vec![path.clone()])
                } else {
                    Err(CorrectionError::InvalidTarget(path.display().to_string()))
                }
            }
            Target::Directory(dir) => {
                if !dir.is_dir() {
                    return Err(CorrectionError::InvalidTarget(dir.display().to_string()));
                }
                let mut files = Vec::new();
                for entry in walkdir::WalkDir::new(dir).min_depth(1).max_depth(1) {
                    let entry = entry.map_err(|e| CorrectionError::DirectoryScan(e.to_string()))?;
                    let name = entry.file_name().to_string_lossy();
                    if entry.file_type().is_file()
                        && name.starts_with(FILE_PREFIX)
                        && name.ends_with(FILE_EXTENSION)
                    {
                        files.push(entry.into_path());
                    }
                }
                files.sort();
                Ok(files)
            }
        }
    }
}

/// Per-batch tally.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed.len()
    }
}

/// Apply `op` to every file. A failure is logged and recorded; the rest continue.
pub fn run_batch<T, F>(files: &[PathBuf], op: F) -> BatchOutcome
where
    T: Debug,
    F: Fn(&Path) -> Result<T>,
{
    let mut outcome = BatchOutcome::default();
    for path in files {
        match op(path) {
            Ok(result) => {
                info!(path = %path.display(), result = ?result, "Processed file");
                outcome.succeeded += 1;
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to process file");
                outcome.failed.push((path.clone(), e.to_string()));
            }
        }
    }
    outcome
}
