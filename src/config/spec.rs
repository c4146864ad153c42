//! Topology specification types.
//!
//! This module defines the structs that map to the topology document the
//! daemon is invoked with. The document fully describes the desired state:
//! which volume groups must exist and which block devices back them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// The root topology document.
///
/// Loaded once per process; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TopologyConfig {
    /// Operating mode for this invocation.
    #[serde(default)]
    pub mode: Mode,
    /// Volume groups to reconcile, in declaration order.
    #[serde(default)]
    pub volume_groups: Vec<VolumeGroupSpec>,
}

/// A single declared volume group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct VolumeGroupSpec {
    /// Volume group name, used as the reconciliation key.
    ///
    /// Duplicate names are not deduplicated here; the storage layer applies
    /// first-write-wins semantics.
    pub name: String,
    /// Block devices backing the group, in declaration order.
    pub devices: Vec<String>,
}

/// Operating mode for a daemon invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Ensure the declared topology exists, then monitor for device growth.
    #[default]
    Create,
    /// Drive the declared topology toward non-existence.
    Destroy,
}

impl Mode {
    /// Canonical lowercase name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    /// Parses a mode case-insensitively; the empty string means create.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "create" => Ok(Self::Create),
            "destroy" => Ok(Self::Destroy),
            _ => Err(ConfigError::UnknownMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl TopologyConfig {
    /// Checks the parsed document for values the reconcilers cannot act on.
    ///
    /// Duplicate volume group names are deliberately accepted.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank volume group name, an empty device list,
    /// or a blank device path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for vg in &self.volume_groups {
            if vg.name.trim().is_empty() {
                return Err(ConfigError::validation(
                    "volume group name must not be empty",
                ));
            }
            if vg.devices.is_empty() {
                return Err(ConfigError::validation(format!(
                    "volume group '{}' declares no devices",
                    vg.name
                )));
            }
            if vg.devices.iter().any(|d| d.trim().is_empty()) {
                return Err(ConfigError::validation(format!(
                    "volume group '{}' declares a blank device path",
                    vg.name
                )));
            }
        }
        Ok(())
    }

    /// Iterates every declared device across all volume groups, in order.
    ///
    /// Devices listed under multiple groups appear once per listing.
    pub fn all_devices(&self) -> impl Iterator<Item = &str> {
        self.volume_groups
            .iter()
            .flat_map(|vg| vg.devices.iter().map(String::as_str))
    }

    /// Total number of declared device entries.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.all_devices().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vg(name: &str, devices: &[&str]) -> VolumeGroupSpec {
        VolumeGroupSpec {
            name: name.to_string(),
            devices: devices.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_mode_parse_case_insensitive() {
        assert_eq!("create".parse::<Mode>().unwrap(), Mode::Create);
        assert_eq!("CREATE".parse::<Mode>().unwrap(), Mode::Create);
        assert_eq!("Destroy".parse::<Mode>().unwrap(), Mode::Destroy);
        assert_eq!("".parse::<Mode>().unwrap(), Mode::Create);
    }

    #[test]
    fn test_mode_parse_rejects_unknown() {
        let err = "scrub".parse::<Mode>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMode { mode } if mode == "scrub"));
    }

    #[test]
    fn test_mode_defaults_to_create() {
        let config: TopologyConfig = serde_yaml::from_str("volumeGroups: []").unwrap();
        assert_eq!(config.mode, Mode::Create);
    }

    #[test]
    fn test_unknown_mode_fails_deserialization() {
        let result = serde_yaml::from_str::<TopologyConfig>("mode: scrub\nvolumeGroups: []");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let yaml = "mode: create\nvolumeGroups: []\nextra: true\n";
        assert!(serde_yaml::from_str::<TopologyConfig>(yaml).is_err());

        let yaml = "volumeGroups:\n  - name: vg0\n    devices: [/dev/sdb]\n    size: 10G\n";
        assert!(serde_yaml::from_str::<TopologyConfig>(yaml).is_err());
    }

    #[test]
    fn test_validate_accepts_duplicates() {
        let config = TopologyConfig {
            mode: Mode::Create,
            volume_groups: vec![vg("vg0", &["/dev/sdb"]), vg("vg0", &["/dev/sdc"])],
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let config = TopologyConfig {
            mode: Mode::Create,
            volume_groups: vec![vg("  ", &["/dev/sdb"])],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_devices() {
        let config = TopologyConfig {
            mode: Mode::Create,
            volume_groups: vec![vg("vg0", &[])],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_device() {
        let config = TopologyConfig {
            mode: Mode::Create,
            volume_groups: vec![vg("vg0", &["/dev/sdb", ""])],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_all_devices_flattens_in_order() {
        let config = TopologyConfig {
            mode: Mode::Create,
            volume_groups: vec![vg("vg0", &["/dev/sdb", "/dev/sdc"]), vg("vg1", &["/dev/sdd"])],
        };
        let devices: Vec<&str> = config.all_devices().collect();
        assert_eq!(devices, vec!["/dev/sdb", "/dev/sdc", "/dev/sdd"]);
        assert_eq!(config.device_count(), 3);
    }
}
