// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// ============================================================================
// Crate Documentation
// ============================================================================

//! # lvminit
//!
//! A declarative, idempotent reconciliation daemon for node-local LVM volume
//! groups.
//!
//! ## Overview
//!
//! lvminit is invoked at node bring-up (typically as an init container) with
//! a YAML document describing the physical volumes and volume groups the
//! node must have, and keeps observed storage state converged with it:
//!
//! - Create missing PVs and VGs, tolerating everything that already exists
//! - Grow PVs online when their backing block devices grow
//! - In destroy mode, drive the declared topology toward non-existence,
//!   retrying under a wall-clock deadline
//!
//! ## Architecture
//!
//! The system is built around **desired state reconciliation**:
//!
//! 1. **Desired State**: the topology document, loaded once per process
//! 2. **Observed State**: queried from the LVM tools before every action
//! 3. **Reconcilers**: compare states and execute converging commands
//!
//! No state is persisted; everything is re-derived each pass by querying
//! the storage layer, so the daemon is safe to restart at any time.
//!
//! ## Modules
//!
//! - [`config`]: Topology document parsing and validation
//! - [`lvm`]: Command execution, failure classification, and probing
//! - [`reconciler`]: Create, destroy, and resize reconciliation engines
//! - [`devices`]: Informational block-device scan
//! - [`error`]: Error hierarchy
//!
//! ## Example
//!
//! ```yaml
//! mode: create
//! volumeGroups:
//!   - name: vg-data
//!     devices:
//!       - /dev/sdb
//!       - /dev/sdc
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod devices;
pub mod error;
pub mod lvm;
pub mod reconciler;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ConfigParser, Mode, TopologyConfig, VolumeGroupSpec};
pub use error::{LvminitError, Result};
pub use lvm::{CommandRunner, ConflictKind, EnsureOutcome, Lvm, StorageProber, SystemCommandRunner};
pub use reconciler::{CreateReconciler, CreateSummary, DestroyReconciler, ResizeMonitor, SizeSnapshot};
