//! Online physical-volume resize monitoring.
//!
//! Cloud block devices grow in place; the PV sitting on top does not. The
//! monitor compares each declared device's current size against the last
//! size it successfully recorded and issues an online `pvresize` whenever
//! strict growth is detected. A device with no recorded size counts as size
//! zero, so the first successful probe of any real device triggers exactly
//! one resize attempt.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::TopologyConfig;
use crate::lvm::{CommandRunner, Lvm, StorageProber};

/// Last successfully observed size of each device, in bytes.
///
/// Entries for devices whose probe failed are absent, never zero; a failed
/// probe during a tick leaves the previous entry in place.
pub type SizeSnapshot = HashMap<String, u64>;

/// Monitor that reacts to backing-device growth with online PV resizes.
#[derive(Debug)]
pub struct ResizeMonitor<'a, R: CommandRunner> {
    /// Desired topology.
    topology: &'a TopologyConfig,
    /// LVM command surface.
    lvm: &'a Lvm<'a, R>,
    /// Size prober.
    prober: &'a StorageProber<'a, R>,
}

impl<'a, R: CommandRunner> ResizeMonitor<'a, R> {
    /// Creates a new resize monitor.
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
        }
    }

    /// Probes every declared device once and resizes the grown ones.
    ///
    /// Returns the refreshed snapshot to carry into the next tick. Probe
    /// failures keep the previous entry (last-known-good, never reset to
    /// unknown); resize failures are warnings, since the device may be
    /// transiently busy, and growth remains visible to the next tick only
    /// if it continues.
    pub async fn tick(&self, previous: &SizeSnapshot) -> SizeSnapshot {
        debug!("Checking for backing-device size changes");
        let mut updated = previous.clone();

        for device in self.topology.all_devices() {
            match self.prober.device_size(device).await {
                Ok(size) => {
                    let last = previous.get(device).copied().unwrap_or(0);
                    if size > last {
                        info!(
                            device = %device,
                            old_size_bytes = last,
                            new_size_bytes = size,
                            "Resizing physical volume"
                        );
                        if let Err(err) = self.lvm.resize_pv(device).await {
                            warn!(device = %device, error = %err, "pvresize failed");
                        }
                    }
                    updated.insert(device.to_string(), size);
                }
                Err(err) => {
                    warn!(device = %device, error = %err, "Couldn't get device size");
                }
            }
        }

        updated
    }
}
