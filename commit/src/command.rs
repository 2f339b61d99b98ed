// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Execution of external commands

use tokio::process::Command;
use tracing::debug;

use crate::errors::CommandError;

/// Run a program to completion. The program gets killed if the returned future is dropped
/// before it completes.
pub(crate) async fn run_command(program: &str, args: &[String]) -> Result<(), CommandError> {
    let cmdline = std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    debug!("Running '{cmdline}'");

    let output = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| CommandError::Spawn(cmdline.clone(), e))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        Err(CommandError::Failed(cmdline, output.status, stderr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_command() {
        assert!(run_command("true", &[]).await.is_ok());

        let err = run_command("false", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            CommandError::Failed(ref cmd, status, _) if cmd == "false" && !status.success()
        ));

        let err = run_command("/nonexistent/validator", &[]).await.unwrap_err();
        assert!(matches!(err, CommandError::Spawn(..)));
    }

    #[tokio::test]
    async fn test_stderr_is_reported() {
        let args = vec!["-c".to_string(), "echo 'line 3: syntax error' >&2; exit 2".to_string()];
        let err = run_command("sh", &args).await.unwrap_err();
        assert!(matches!(
            err,
            CommandError::Failed(_, status, ref stderr)
                if status.code() == Some(2) && stderr == "line 3: syntax error"
        ));
    }
}
