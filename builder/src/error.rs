//! Errors that stop a generation pass.

use std::path::PathBuf;

use camino::Utf8PathBuf;
use portal_data::{PolicyError, SerializeError, SnapshotError, UnknownValue};
use thiserror::Error;

/// Errors returned by [`run`](crate::run) and its steps.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Settings could not be loaded from the command line or environment.
    #[error("failed to load settings: {message}")]
    Settings {
        /// Loader error message.
        message: String,
    },
    /// The configured build mode is not `development` or `production`.
    #[error("invalid build mode: {0}")]
    Mode(#[source] UnknownValue),
    /// The snapshot file could not be read.
    #[error("failed to read snapshot at {path}: {source}")]
    SnapshotRead {
        /// Path to the snapshot file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The snapshot file is not a valid content snapshot.
    #[error("snapshot parse error: {0}")]
    Snapshot(#[from] SnapshotError),
    /// The build policy rejected the report.
    #[error("build policy failed: {0}")]
    Policy(#[from] PolicyError),
    /// Strict mode rejected a report with warnings.
    #[error("strict build rejected {count} warning(s)")]
    StrictWarnings {
        /// Number of warning entries in the report.
        count: usize,
    },
    /// The dataset could not be serialised.
    #[error(transparent)]
    Serialize(#[from] SerializeError),
    /// The dataset file could not be written.
    #[error("failed to write {path}: {message}")]
    OutputWrite {
        /// Path being written.
        path: Utf8PathBuf,
        /// Underlying error message.
        message: String,
    },
}
