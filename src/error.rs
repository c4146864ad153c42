//! Error types for the lvminit reconciliation daemon.
//!
//! This module provides the error hierarchy for all operations in the
//! provisioning lifecycle: configuration, external command execution,
//! storage probing, and create-mode provisioning.
//!
//! The taxonomy deliberately separates fatal conditions (bad configuration,
//! create-mode provisioning failures) from recoverable ones (probe and
//! teardown failures, which the next reconciliation pass retries naturally).

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the lvminit daemon.
#[derive(Debug, Error)]
pub enum LvminitError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// External command execution errors.
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// Storage probing errors.
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    /// Create-mode provisioning errors.
    #[error("Provisioning error: {0}")]
    Provision(#[from] ProvisionError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
///
/// All of these are fatal at startup: a malformed desired state requires
/// operator intervention, not a retry loop.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be read or parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation of a parsed configuration failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
    },

    /// The `mode` field holds an unrecognized value.
    #[error("Unknown mode '{mode}'. Valid: create (default), destroy")]
    UnknownMode {
        /// The rejected mode string.
        mode: String,
    },
}

/// External command execution errors.
///
/// These carry the command's combined stdout+stderr, which is the external
/// tool's only channel of truth: callers distinguish benign idempotent
/// failures from genuine ones by inspecting the captured output, never by
/// exit code.
#[derive(Debug, Error)]
pub enum CommandError {
    /// An empty argument vector was passed to the runner.
    #[error("Cannot run an empty command")]
    EmptyCommand,

    /// The program could not be spawned at all.
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        /// Name of the program that failed to spawn.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited with a non-zero status.
    #[error("{program} exited with status {code:?}: {output}")]
    Failed {
        /// Name of the program that failed.
        program: String,
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Combined stdout+stderr captured from the process.
        output: String,
    },
}

/// Storage probing errors.
///
/// Probing is best-effort against a potentially slow or momentarily
/// inconsistent storage layer; these are never fatal.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The size query command failed.
    #[error("Failed to query size of {device}: {source}")]
    SizeQuery {
        /// Device whose size could not be determined.
        device: String,
        /// Underlying command failure.
        #[source]
        source: CommandError,
    },

    /// The size query succeeded but its output was not a byte count.
    #[error("Unparsable size for {device}: {output:?}")]
    UnparsableSize {
        /// Device whose size output could not be parsed.
        device: String,
        /// The output that failed to parse.
        output: String,
    },
}

/// Create-mode provisioning errors.
///
/// Fatal: creation is a one-time bring-up action, and a failure that is not
/// an "already exists" conflict means the desired topology cannot be
/// realized without operator intervention.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Creating a physical volume failed for a non-benign reason.
    #[error("Failed to create physical volume on {device}: {source}")]
    PvCreate {
        /// Device that could not be initialized.
        device: String,
        /// Underlying command failure.
        #[source]
        source: CommandError,
    },

    /// Creating a volume group failed for a non-benign reason.
    #[error("Failed to create volume group '{name}': {source}")]
    VgCreate {
        /// Name of the volume group that could not be created.
        name: String,
        /// Underlying command failure.
        #[source]
        source: CommandError,
    },
}

/// Result type alias for lvminit operations.
pub type Result<T> = std::result::Result<T, LvminitError>;

impl ConfigError {
    /// Creates a validation error with the given message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

impl CommandError {
    /// Returns the combined output captured from the failed process, if any.
    ///
    /// Spawn failures produce no output; only a process that actually ran
    /// and exited non-zero carries one.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Failed { output, .. } => Some(output),
            Self::EmptyCommand | Self::Spawn { .. } => None,
        }
    }
}
