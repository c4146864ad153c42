//! Create-mode reconciliation.
//!
//! Ensures every declared physical volume and volume group exists. Creation
//! is a one-time bring-up action: "already exists" conflicts are absorbed,
//! any other failure is fatal for the process, and nothing here runs on a
//! timer.

use tracing::info;

use crate::config::TopologyConfig;
use crate::error::{ProvisionError, Result};
use crate::lvm::{CommandRunner, EnsureOutcome, Lvm};

/// Reconciler that converges the declared topology into existence.
#[derive(Debug)]
pub struct CreateReconciler<'a, R: CommandRunner> {
    /// Desired topology.
    topology: &'a TopologyConfig,
    /// LVM command surface.
    lvm: &'a Lvm<'a, R>,
}

/// Result of a create-mode reconciliation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CreateSummary {
    /// Physical volumes created by this run.
    pub pvs_created: usize,
    /// Physical volumes that already existed.
    pub pvs_existing: usize,
    /// Volume groups created by this run.
    pub vgs_created: usize,
    /// Volume groups that already existed.
    pub vgs_existing: usize,
}

impl<'a, R: CommandRunner> CreateReconciler<'a, R> {
    /// Creates a new create-mode reconciler.
    #[must_use]
    pub const fn new(topology: &'a TopologyConfig, lvm: &'a Lvm<'a, R>) -> Self {
        Self { topology, lvm }
    }

    /// Ensures every declared PV and VG exists, in declaration order.
    ///
    /// Safe to invoke against an already-converged topology: both the
    /// "already a physical volume" and "already exists" conflicts are
    /// treated as success.
    ///
    /// # Errors
    ///
    /// Returns an error as soon as any creation fails for a non-benign
    /// reason; the caller is expected to terminate the process.
    pub async fn ensure_created(&self) -> Result<CreateSummary> {
        let mut summary = CreateSummary::default();

        for vg in &self.topology.volume_groups {
            for device in &vg.devices {
                info!(device = %device, "Ensuring physical volume");
                match self.lvm.create_pv(device).await {
                    Ok(EnsureOutcome::Created) => summary.pvs_created += 1,
                    Ok(EnsureOutcome::AlreadyPresent) => {
                        info!(device = %device, "Physical volume already present");
                        summary.pvs_existing += 1;
                    }
                    Err(source) => {
                        return Err(ProvisionError::PvCreate {
                            device: device.clone(),
                            source,
                        }
                        .into());
                    }
                }
            }

            info!(vg = %vg.name, "Ensuring volume group");
            match self.lvm.create_vg(&vg.name, &vg.devices).await {
                Ok(EnsureOutcome::Created) => summary.vgs_created += 1,
                Ok(EnsureOutcome::AlreadyPresent) => {
                    info!(vg = %vg.name, "Volume group already present");
                    summary.vgs_existing += 1;
                }
                Err(source) => {
                    return Err(ProvisionError::VgCreate {
                        name: vg.name.clone(),
                        source,
                    }
                    .into());
                }
            }
        }

        Ok(summary)
    }
}

impl std::fmt::Display for CreateSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} PVs created, {} already present; {} VGs created, {} already present",
            self.pvs_created, self.pvs_existing, self.vgs_created, self.vgs_existing
        )
    }
}
