//! Destroy-mode reconciliation.
//!
//! Drives every declared VG and PV toward non-existence. Removal is
//! best-effort: failures are logged and retried on the next pass, and a
//! wall-clock deadline bounds how long a single teardown attempt keeps
//! retrying, so a storage layer that can never cleanly release (a device
//! pulled out from under it, say) cannot stall shutdown forever.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::config::TopologyConfig;
use crate::error::CommandError;
use crate::lvm::{CommandRunner, ConflictKind, Lvm, StorageProber, classify_failure};

/// Default interval between teardown passes.
const DEFAULT_PASS_INTERVAL: Duration = Duration::from_secs(10);

/// Default wall-clock budget for one [`DestroyReconciler::destroy_all`]
/// invocation.
const DEFAULT_DEADLINE: Duration = Duration::from_secs(180);

/// Reconciler that converges the declared topology out of existence.
#[derive(Debug)]
pub struct DestroyReconciler<'a, R: CommandRunner> {
    /// Desired topology (to be removed).
    topology: &'a TopologyConfig,
    /// LVM command surface.
    lvm: &'a Lvm<'a, R>,
    /// Existence prober.
    prober: &'a StorageProber<'a, R>,
    /// Interval between passes within one teardown attempt.
    pass_interval: Duration,
    /// Wall-clock budget for one teardown attempt, measured from the call.
    deadline: Duration,
}

impl<'a, R: CommandRunner> DestroyReconciler<'a, R> {
    /// Creates a new destroy-mode reconciler with default timing.
    #[must_use]
    pub const fn new(
        topology: &'a TopologyConfig,
        lvm: &'a Lvm<'a, R>,
        prober: &'a StorageProber<'a, R>,
    ) -> Self {
        Self {
            topology,
            lvm,
            prober,
            pass_interval: DEFAULT_PASS_INTERVAL,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Sets the interval between teardown passes.
    #[must_use]
    pub const fn with_pass_interval(mut self, pass_interval: Duration) -> Self {
        self.pass_interval = pass_interval;
        self
    }

    /// Sets the wall-clock budget for one teardown attempt.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Runs one teardown pass over the declared topology.
    ///
    /// Existence is re-checked before each removal attempt, so a pass only
    /// reports `true` when the previous pass's work is confirmed complete:
    /// convergence is detected one pass after it actually occurs.
    pub async fn destroy_pass(&self) -> bool {
        let mut all_removed = true;

        for vg in &self.topology.volume_groups {
            if self.prober.vg_exists(&vg.name).await {
                all_removed = false;
                info!(vg = %vg.name, "Destroying volume group");

                // LVs block vgremove; clear them first, best-effort.
                if let Err(err) = self.lvm.remove_logical_volumes(&vg.name).await {
                    self.log_removal_failure("lvremove", &vg.name, &err);
                }
                if let Err(err) = self.lvm.remove_vg(&vg.name).await {
                    self.log_removal_failure("vgremove", &vg.name, &err);
                }
            }

            for device in &vg.devices {
                if self.prober.pv_exists(device).await {
                    all_removed = false;
                    info!(device = %device, "Destroying physical volume");
                    if let Err(err) = self.lvm.remove_pv(device).await {
                        self.log_removal_failure("pvremove", device, &err);
                    }
                }
            }
        }

        all_removed
    }

    /// Repeats teardown passes until everything is gone or the deadline
    /// elapses.
    ///
    /// Returns whether teardown converged. A `false` return is best-effort
    /// by design: the caller may re-invoke later, at which point a fresh
    /// deadline applies.
    pub async fn destroy_all(&self) -> bool {
        let deadline = Instant::now() + self.deadline;

        loop {
            if self.destroy_pass().await {
                return true;
            }
            if Instant::now() >= deadline {
                warn!(
                    budget_secs = self.deadline.as_secs(),
                    "Teardown deadline elapsed before convergence"
                );
                return false;
            }
            sleep(self.pass_interval).await;
        }
    }

    /// Logs a removal failure, downgrading already-gone conflicts.
    fn log_removal_failure(&self, operation: &str, target: &str, err: &CommandError) {
        if classify_failure(err) == ConflictKind::AlreadyAbsent {
            debug!(operation, target, "Target already gone");
        } else {
            warn!(operation, target, error = %err, "Removal failed, will retry next pass");
        }
    }
}
