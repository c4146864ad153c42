//! Informational block-device scan.
//!
//! Logged once at startup so the node's disks are visible next to the
//! declared topology. The result has no effect on reconciliation decisions.

use std::io;
use std::path::Path;

/// Device-name prefixes considered block devices worth reporting.
const BLOCK_DEVICE_PREFIXES: &[&str] = &["sd", "nvme", "loop"];

/// Scans `/dev` for block devices.
///
/// # Errors
///
/// Returns an error if `/dev` cannot be read.
pub fn scan_block_devices() -> io::Result<Vec<String>> {
    scan_block_devices_in(Path::new("/dev"))
}

/// Scans an arbitrary directory with the same prefix filter as
/// [`scan_block_devices`].
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn scan_block_devices_in(dir: &Path) -> io::Result<Vec<String>> {
    let mut devices = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };

        if BLOCK_DEVICE_PREFIXES.iter().any(|p| name.starts_with(p)) {
            let full = dir.join(name);
            if full.exists() {
                devices.push(full.display().to_string());
            }
        }
    }

    devices.sort();
    Ok(devices)
}
