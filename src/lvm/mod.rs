//! LVM integration module.
//!
//! This module is the boundary to the external volume-management toolkit:
//! command execution, failure classification, the typed command surface,
//! and best-effort probes of the observed state. Everything above it works
//! in terms of these types and never shells out directly.

mod outcome;
mod probe;
mod runner;
mod tool;

#[cfg(test)]
pub(crate) mod fake;

pub use outcome::{ConflictKind, classify_failure};
pub use probe::StorageProber;
pub use runner::{CommandRunner, SystemCommandRunner};
pub use tool::{EnsureOutcome, Lvm};
