//! External command execution.
//!
//! Every interaction with the storage layer goes through the
//! [`CommandRunner`] trait, which is the seam the reconciler tests inject a
//! scripted runner through. The real implementation spawns the command and
//! captures stdout and stderr merged into a single string, because the LVM
//! tools report everything that matters as free-form text.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::CommandError;

/// Trait for running external commands to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the program named by `argv[0]` with the remaining arguments,
    /// waits for it to exit, and returns its combined stdout+stderr.
    ///
    /// No retries and no timeout at this layer; retry policy belongs to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns an error if `argv` is empty, the program cannot be spawned,
    /// or it exits with a non-zero status. A non-zero exit still carries the
    /// captured combined output.
    async fn run(&self, argv: &[String]) -> Result<String, CommandError>;
}

/// Command runner that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    /// Creates a new system command runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, argv: &[String]) -> Result<String, CommandError> {
        let Some((program, args)) = argv.split_first() else {
            return Err(CommandError::EmptyCommand);
        };

        debug!(command = %argv.join(" "), "Running external command");

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: program.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(combined)
        } else {
            Err(CommandError::Failed {
                program: program.clone(),
                code: output.status.code(),
                output: combined,
            })
        }
    }
}

/// Builds an owned argument vector from string literals and borrowed paths.
pub(crate) fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = SystemCommandRunner::new();
        let output = runner
            .run(&argv(&["echo", "hello"]))
            .await
            .expect("echo should succeed");
        assert!(output.contains("hello"));
    }

    #[tokio::test]
    async fn test_run_nonzero_exit_carries_output() {
        let runner = SystemCommandRunner::new();
        let err = runner
            .run(&argv(&["sh", "-c", "echo oops >&2; exit 3"]))
            .await
            .expect_err("command should fail");

        match err {
            CommandError::Failed { code, output, .. } => {
                assert_eq!(code, Some(3));
                assert!(output.contains("oops"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let runner = SystemCommandRunner::new();
        let err = runner
            .run(&argv(&["/nonexistent/lvminit-test-binary"]))
            .await
            .expect_err("spawn should fail");
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_run_empty_argv() {
        let runner = SystemCommandRunner::new();
        let err = runner.run(&[]).await.expect_err("empty argv should fail");
        assert!(matches!(err, CommandError::EmptyCommand));
    }
}
