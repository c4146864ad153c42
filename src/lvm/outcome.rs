//! Classification of failed LVM commands.
//!
//! The LVM tools have no structured exit-code taxonomy: "the device is
//! already a physical volume" and "the device does not exist" both come back
//! as a non-zero exit with a message. The reconcilers care deeply about the
//! difference, so the string matching is isolated here, behind one function
//! that can be unit-tested against literal message fixtures and adjusted in
//! a single place if the tool's wording changes.

use crate::error::CommandError;

/// How a failed command relates to the state it tried to establish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// The entity the command tried to create already exists.
    AlreadyExists,
    /// The entity the command tried to remove is already gone.
    AlreadyAbsent,
    /// Any other failure.
    Other,
}

/// Message fragments emitted when creating something that already exists.
const ALREADY_EXISTS_MARKERS: &[&str] = &["is already a physical volume", "already exists"];

/// Message fragments emitted when removing something that is already gone.
const ALREADY_ABSENT_MARKERS: &[&str] = &["not found", "No PV label found"];

/// Classifies a failed command by inspecting its captured output.
///
/// Failures with no captured output (spawn failures) are always
/// [`ConflictKind::Other`].
#[must_use]
pub fn classify_failure(error: &CommandError) -> ConflictKind {
    let Some(output) = error.output() else {
        return ConflictKind::Other;
    };

    if ALREADY_EXISTS_MARKERS.iter().any(|m| output.contains(m)) {
        return ConflictKind::AlreadyExists;
    }
    if ALREADY_ABSENT_MARKERS.iter().any(|m| output.contains(m)) {
        return ConflictKind::AlreadyAbsent;
    }
    ConflictKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(output: &str) -> CommandError {
        CommandError::Failed {
            program: String::from("lvm"),
            code: Some(5),
            output: output.to_string(),
        }
    }

    #[test]
    fn test_classify_existing_pv() {
        let err = failed("  Can't initialize physical volume \"/dev/sdb\" of volume group \"vg0\" without -ff\n  /dev/sdb is already a physical volume\n");
        assert_eq!(classify_failure(&err), ConflictKind::AlreadyExists);
    }

    #[test]
    fn test_classify_existing_vg() {
        let err = failed("  A volume group called vg0 already exists.\n");
        assert_eq!(classify_failure(&err), ConflictKind::AlreadyExists);
    }

    #[test]
    fn test_classify_missing_vg() {
        let err = failed("  Volume group \"vg0\" not found\n  Cannot process volume group vg0\n");
        assert_eq!(classify_failure(&err), ConflictKind::AlreadyAbsent);
    }

    #[test]
    fn test_classify_missing_pv_label() {
        let err = failed("  No PV label found on /dev/sdb.\n");
        assert_eq!(classify_failure(&err), ConflictKind::AlreadyAbsent);
    }

    #[test]
    fn test_classify_genuine_failure() {
        let err = failed("  Device /dev/sdb excluded by a filter.\n");
        assert_eq!(classify_failure(&err), ConflictKind::Other);
    }

    #[test]
    fn test_classify_spawn_failure() {
        let err = CommandError::Spawn {
            program: String::from("pvcreate"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(classify_failure(&err), ConflictKind::Other);
    }
}
