//! Reconciliation engines for the declared topology.
//!
//! Three engines share the same inputs (the topology, the LVM command
//! surface, and the prober) and differ only in the direction they converge:
//! - [`CreateReconciler`] brings the topology into existence, once.
//! - [`DestroyReconciler`] drives it toward non-existence under a deadline.
//! - [`ResizeMonitor`] keeps PVs sized to their grown backing devices.

mod create;
mod destroy;
mod resize;

pub use create::{CreateReconciler, CreateSummary};
pub use destroy::DestroyReconciler;
pub use resize::{ResizeMonitor, SizeSnapshot};
