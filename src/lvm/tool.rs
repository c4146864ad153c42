//! Typed command surface over the LVM userspace tools.
//!
//! Each method builds the exact argument vector for one LVM operation. The
//! create operations run in forced, non-interactive form and absorb
//! "already exists" conflicts, so calling them against an already-converged
//! topology is a no-op rather than an error.

use crate::error::CommandError;

use super::outcome::{ConflictKind, classify_failure};
use super::runner::{CommandRunner, argv};

/// Result of an idempotent create operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The entity was created by this call.
    Created,
    /// The entity already existed; nothing was changed.
    AlreadyPresent,
}

/// Typed wrapper around the LVM command-line tools.
#[derive(Debug)]
pub struct Lvm<'a, R> {
    /// Command runner used for every invocation.
    runner: &'a R,
}

impl<'a, R: CommandRunner> Lvm<'a, R> {
    /// Creates a new LVM command surface over the given runner.
    #[must_use]
    pub const fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Registers a block device as a physical volume (forced, assume-yes).
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the device already being
    /// a physical volume.
    pub async fn create_pv(&self, device: &str) -> Result<EnsureOutcome, CommandError> {
        self.ensure(argv(&["pvcreate", "-ff", "-y", device])).await
    }

    /// Creates a volume group over the given device list.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the group already
    /// existing.
    pub async fn create_vg(&self, name: &str, devices: &[String]) -> Result<EnsureOutcome, CommandError> {
        let mut command = argv(&["vgcreate", name]);
        command.extend(devices.iter().cloned());
        self.ensure(command).await
    }

    /// Force-removes every logical volume in a group, without
    /// autoactivation.
    ///
    /// # Errors
    ///
    /// Returns the raw command failure; teardown callers treat it as
    /// best-effort.
    pub async fn remove_logical_volumes(&self, vg_name: &str) -> Result<(), CommandError> {
        self.runner
            .run(&argv(&["lvremove", "-A", "n", "-f", vg_name]))
            .await
            .map(|_| ())
    }

    /// Force-removes a volume group.
    ///
    /// # Errors
    ///
    /// Returns the raw command failure; teardown callers treat it as
    /// best-effort.
    pub async fn remove_vg(&self, name: &str) -> Result<(), CommandError> {
        self.runner
            .run(&argv(&["vgremove", "-f", name]))
            .await
            .map(|_| ())
    }

    /// Force-removes a physical volume (assume-yes).
    ///
    /// # Errors
    ///
    /// Returns the raw command failure; teardown callers treat it as
    /// best-effort.
    pub async fn remove_pv(&self, device: &str) -> Result<(), CommandError> {
        self.runner
            .run(&argv(&["pvremove", "-ff", "-y", device]))
            .await
            .map(|_| ())
    }

    /// Grows a physical volume online to match its backing device.
    ///
    /// # Errors
    ///
    /// Returns the raw command failure; the monitor treats it as transient.
    pub async fn resize_pv(&self, device: &str) -> Result<(), CommandError> {
        self.runner.run(&argv(&["pvresize", device])).await.map(|_| ())
    }

    /// Runs a create command and absorbs already-exists conflicts.
    async fn ensure(&self, command: Vec<String>) -> Result<EnsureOutcome, CommandError> {
        match self.runner.run(&command).await {
            Ok(_) => Ok(EnsureOutcome::Created),
            Err(err) if classify_failure(&err) == ConflictKind::AlreadyExists => {
                Ok(EnsureOutcome::AlreadyPresent)
            }
            Err(err) => Err(err),
        }
    }
}
