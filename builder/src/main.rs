//! Generator entry-point: loads settings, runs one pass, reports the outcome.

use std::process::ExitCode;

use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use portal_builder::{BuildError, BuildSettings, run};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = match BuildSettings::load_from_iter(std::env::args_os()) {
        Ok(settings) => settings,
        Err(e) => {
            let err = BuildError::Settings {
                message: e.to_string(),
            };
            error!(error = %err, "generation aborted");
            return ExitCode::FAILURE;
        }
    };

    match run(&settings) {
        Ok(outcome) => {
            info!(
                mode = %outcome.mode,
                entities = outcome.entities,
                excluded = outcome.excluded,
                warnings = outcome.warnings,
                output = outcome.output_path.as_ref().map(|path| path.display().to_string()),
                "generation finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "generation failed");
            ExitCode::FAILURE
        }
    }
}
