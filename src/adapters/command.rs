//! Subprocess runner shared by the CLI adapters.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// Run a tool to completion and return its stdout.
///
/// A spawn failure or non-zero exit status is an error. Invalid UTF-8 is
/// replaced rather than rejected.
#[instrument(skip(program), fields(tool = %program.display()))]
pub async fn run_command(program: &Path, args: &[&str]) -> Result<String> {
    let command = describe(program, args);

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|e| Error::CommandSpawn {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::CommandFailed {
            command,
            // Signal-terminated processes have no code
            status: output.status.code().unwrap_or(-1),
        });
    }

    debug!(bytes = output.stdout.len(), "Command completed");
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn describe(program: &Path, args: &[&str]) -> String {
    std::iter::once(program.display().to_string())
        .chain(args.iter().map(|a| a.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}
