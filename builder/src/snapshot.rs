//! Reading the raw content snapshot from disk.

use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use portal_data::RawSnapshot;

use crate::error::BuildError;

/// Reads and parses the snapshot at `path`.
///
/// # Errors
///
/// Returns [`BuildError::SnapshotRead`] when the file cannot be opened or is
/// not UTF-8, and [`BuildError::Snapshot`] when it is not a valid snapshot.
pub fn load_snapshot(path: &Path) -> Result<RawSnapshot, BuildError> {
    let read_error = |source| BuildError::SnapshotRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "snapshot path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(RawSnapshot::from_json(&contents)?)
}
