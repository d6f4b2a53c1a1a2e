//! Working-directory lifecycle
//!
//! Filesystem helpers for the scenario's working directory: idempotent
//! setup plus file creation and removal relative to that directory.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Reset `path` to an empty directory.
///
/// An existing directory is removed recursively first; a missing one is not
/// an error. Repeated runs over the same path always start from scratch.
pub fn prepare(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::create_dir_all(path)
}

/// Write `content` to `name` under `dir` only if the file does not exist.
///
/// A pre-existing file is left untouched and the call succeeds. The original
/// scenario opened pre-existing files read-only, so its second write was a
/// silent no-op; this makes the skip explicit and keeps re-runs over a
/// populated directory from duplicating content. The handle closes on every
/// exit path.
pub fn write_new_file(dir: &Path, name: &str, content: &str) -> io::Result<()> {
    let path = dir.join(name);
    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(mut file) => file.write_all(content.as_bytes()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

/// Delete `name` under `dir`. Missing files are an error.
pub fn remove_file(dir: &Path, name: &str) -> io::Result<()> {
    fs::remove_file(dir.join(name))
}
