//! Generation-pass configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use portal_data::BuildMode;
use serde::Deserialize;

use crate::error::BuildError;

const DEFAULT_SNAPSHOT_PATH: &str = "content/snapshot.json";

/// Configuration values controlling one generation pass.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL_DATASET")]
pub struct BuildSettings {
    /// Raw content snapshot to decode.
    pub snapshot_path: Option<PathBuf>,
    /// Where to write the decoded dataset; nothing is written when unset.
    pub output_path: Option<PathBuf>,
    /// `development` or `production`; defaults by build profile.
    pub mode: Option<String>,
    /// Fail on warnings as well as excluded records.
    #[ortho_config(default = false)]
    pub strict: bool,
}

impl BuildSettings {
    /// Return the configured snapshot path, falling back to the default.
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH))
    }

    /// Return the configured build mode.
    ///
    /// Debug builds default to development, release builds to production.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Mode`] for an unrecognised mode.
    pub fn mode(&self) -> Result<BuildMode, BuildError> {
        match self.mode.as_deref().map(str::trim) {
            None | Some("") => Ok(default_mode()),
            Some(raw) => raw.parse().map_err(BuildError::Mode),
        }
    }
}

const fn default_mode() -> BuildMode {
    if cfg!(debug_assertions) {
        BuildMode::Development
    } else {
        BuildMode::Production
    }
}
