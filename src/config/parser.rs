//! Configuration parser for loading the topology document.
//!
//! This module handles loading the topology from a YAML file with proper
//! error mapping, so startup failures carry the file location that caused
//! them.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ConfigError, LvminitError, Result};

use super::spec::TopologyConfig;

/// Parser for the topology configuration document.
#[derive(Debug, Default)]
pub struct ConfigParser;

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads and validates the topology from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, not valid YAML,
    /// or fails validation.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<TopologyConfig> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading topology configuration");

        if !path.exists() {
            return Err(LvminitError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            LvminitError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses and validates the topology from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or validation fails.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<TopologyConfig> {
        debug!("Parsing YAML topology");

        let config: TopologyConfig = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            LvminitError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        config.validate()?;

        debug!(
            volume_groups = config.volume_groups.len(),
            "Successfully parsed topology"
        );
        Ok(config)
    }
}
