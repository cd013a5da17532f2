//! External tool invocation.

use crate::bundler::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Output;
use tokio::process::Command;

/// Runs `program` with `args` to completion and captures its output.
///
/// The caller's task waits until the child exits. A spawn failure or a
/// non-zero exit status becomes [`Error::ToolFailed`] carrying the captured
/// standard error.
pub async fn run_tool<I, S>(tool: &str, program: &Path, args: I) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args).kill_on_drop(true);
    log::debug!("Running {:?}", command.as_std());

    let output = command.output().await.map_err(|e| Error::ToolFailed {
        tool: tool.to_string(),
        status: "could not be started".to_string(),
        stderr: format!("{}: {}", program.display(), e),
    })?;

    if !output.status.success() {
        return Err(Error::ToolFailed {
            tool: tool.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout() {
        let out = run_tool("sh", Path::new("sh"), ["-c", "echo hello"])
            .await
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "hello");
    }

    #[tokio::test]
    async fn non_zero_exit_carries_stderr() {
        let err = run_tool("sh", Path::new("sh"), ["-c", "echo broken >&2; exit 3"])
            .await
            .unwrap_err();
        match err {
            Error::ToolFailed { tool, stderr, .. } => {
                assert_eq!(tool, "sh");
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_program_is_a_tool_failure() {
        let err = run_tool("nope", Path::new("/definitely/not/here"), Vec::<&str>::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));
    }
}
