//! Atomic dataset output.
//!
//! The dataset is written to a hidden temporary file in the target directory
//! and renamed into place, so page generators never observe a partial file.

use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{
    ambient_authority,
    fs::{Dir, OpenOptions},
};

use crate::error::BuildError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes `contents` to `path`, replacing any previous file atomically.
///
/// # Errors
///
/// Returns [`BuildError::OutputWrite`] when the path is not valid UTF-8, its
/// directory cannot be opened, or the write or rename fails.
pub fn write_output(path: &Path, contents: &str) -> Result<(), BuildError> {
    let utf8 = Utf8Path::from_path(path).ok_or_else(|| BuildError::OutputWrite {
        path: Utf8PathBuf::from(path.to_string_lossy().into_owned()),
        message: "output path must be valid UTF-8".to_owned(),
    })?;
    let parent = match utf8.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = utf8.file_name().ok_or_else(|| BuildError::OutputWrite {
        path: utf8.to_path_buf(),
        message: "output path must be a file".to_owned(),
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| {
        BuildError::OutputWrite {
            path: parent.to_path_buf(),
            message: err.to_string(),
        }
    })?;
    write_atomic(&dir, Utf8Path::new(file_name), contents)
}

/// Writes `contents` to the single-component `path` inside `dir`.
pub(crate) fn write_atomic(dir: &Dir, path: &Utf8Path, contents: &str) -> Result<(), BuildError> {
    let mut components = path.components();
    let (Some(Utf8Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return Err(BuildError::OutputWrite {
            path: path.to_path_buf(),
            message: "output path must be a file".to_owned(),
        });
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{file_name}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    );

    write_temp_file(dir, &tmp_name, path, contents)?;
    if let Err(err) = replace_target(dir, &tmp_name, file_name) {
        drop(dir.remove_file(&tmp_name));
        return Err(BuildError::OutputWrite {
            path: path.to_path_buf(),
            message: err.to_string(),
        });
    }
    // Directory sync is best effort.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
    Ok(())
}

fn write_temp_file(
    dir: &Dir,
    tmp_name: &str,
    target_path: &Utf8Path,
    contents: &str,
) -> Result<(), BuildError> {
    let tmp_path = target_path.with_file_name(tmp_name);
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir
        .open_with(tmp_name, &options)
        .map_err(|err| BuildError::OutputWrite {
            path: tmp_path.clone(),
            message: err.to_string(),
        })?;

    if let Err(err) = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all())
    {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(BuildError::OutputWrite {
            path: tmp_path,
            message: err.to_string(),
        });
    }
    Ok(())
}

#[cfg(windows)]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}
