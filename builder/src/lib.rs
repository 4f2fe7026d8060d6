//! Build-time dataset generator for the volunteer portal.
//!
//! Reads a raw content snapshot, aggregates it with `portal-data`, applies
//! the build policy, and writes the dataset for page generation.

pub mod error;
pub mod output;
pub mod run;
pub mod settings;
pub mod snapshot;

pub use error::BuildError;
pub use output::write_output;
pub use run::{BuildOutcome, run};
pub use settings::BuildSettings;
pub use snapshot::load_snapshot;
