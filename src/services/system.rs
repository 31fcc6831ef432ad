//! Host program checks

use std::process::Stdio;

use tokio::process::Command;
use tracing::info;

use crate::error::EffectError;

/// Check that an external program used for side effects can be launched
pub async fn check_program_available(program: &str) -> Result<(), EffectError> {
    Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|source| EffectError::Launch {
            program: program.to_string(),
            source,
        })?;

    info!("{} is available", program);
    Ok(())
}
