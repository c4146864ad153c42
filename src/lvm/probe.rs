//! Best-effort probes of the observed storage state.
//!
//! Existence checks fetch the full VG or PV listing every call and look for
//! an exact trimmed match; there is no server to cache against and the
//! listings are cheap. A listing that cannot be fetched is answered with
//! "absent", which biases the reconcilers toward re-attempting creation or
//! destruction rather than skipping it.

use tracing::debug;

use crate::error::ProbeError;

use super::runner::{CommandRunner, argv};

/// Read-only prober for volume groups, physical volumes, and device sizes.
#[derive(Debug)]
pub struct StorageProber<'a, R> {
    /// Command runner used for every query.
    runner: &'a R,
}

impl<'a, R: CommandRunner> StorageProber<'a, R> {
    /// Creates a new prober over the given runner.
    #[must_use]
    pub const fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Returns true if a volume group with this exact name currently exists.
    ///
    /// Returns false when the listing query itself fails.
    pub async fn vg_exists(&self, name: &str) -> bool {
        self.listing_contains(&["vgs", "--noheadings", "-o", "vg_name"], name)
            .await
    }

    /// Returns true if this device is currently registered as a physical
    /// volume.
    ///
    /// Returns false when the listing query itself fails.
    pub async fn pv_exists(&self, device: &str) -> bool {
        self.listing_contains(&["pvs", "--noheadings", "-o", "pv_name"], device)
            .await
    }

    /// Current size of the backing block device, in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the size query fails or its output does not start
    /// with an integer. Callers must treat this as "unknown", never as zero.
    pub async fn device_size(&self, device: &str) -> Result<u64, ProbeError> {
        let output = self
            .runner
            .run(&argv(&["blockdev", "--getsize64", device]))
            .await
            .map_err(|source| ProbeError::SizeQuery {
                device: device.to_string(),
                source,
            })?;

        output
            .split_whitespace()
            .next()
            .and_then(|word| word.parse::<u64>().ok())
            .ok_or_else(|| ProbeError::UnparsableSize {
                device: device.to_string(),
                output,
            })
    }

    /// Fetches a listing and checks it for an exact trimmed line match.
    async fn listing_contains(&self, command: &[&str], needle: &str) -> bool {
        match self.runner.run(&argv(command)).await {
            Ok(listing) => listing.lines().any(|line| line.trim() == needle),
            Err(err) => {
                debug!(error = %err, "Listing query failed, treating entry as absent");
                false
            }
        }
    }
}
