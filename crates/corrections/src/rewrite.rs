//! Temp-file-then-rename replacement of files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Result;

/// Suffix of the scratch file written next to the original.
pub const TEMP_SUFFIX: &str = ".temp";

/// `path` with [`TEMP_SUFFIX`] appended to the file name.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Let `write` produce a complete replacement at the temp path, then move it
/// over `path`.
///
/// The original is untouched if `write` fails; the scratch file is removed.
/// No backup is kept.
pub fn replace_via_temp<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&Path) -> Result<T>,
{
    let temp = temp_path(path);

    let outcome = write(&temp).and_then(|value| {
        fs::rename(&temp, path)?;
        Ok(value)
    });

    if outcome.is_err() && temp.exists() {
        if let Err(e) = fs::remove_file(&temp) {
            warn!(path = %temp.display(), error = %e, "Failed to remove scratch file");
        }
    }
    outcome
}
