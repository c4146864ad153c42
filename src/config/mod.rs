//! Configuration module for the lvminit daemon.
//!
//! This module handles all configuration-related functionality:
//! - Parsing and deserializing the topology document
//! - Strict rejection of unknown fields and unknown modes
//! - Validation of the parsed topology

mod parser;
mod spec;

pub use parser::ConfigParser;
pub use spec::{Mode, TopologyConfig, VolumeGroupSpec};
