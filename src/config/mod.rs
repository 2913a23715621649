//! Configuration
//!
//! Layered configuration for export rules and logging. Sources, lowest
//! precedence first: built-in defaults, the global config file, the
//! workspace `treeforge.toml`, then `TREEFORGE__*` environment variables.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the per-workspace config file
pub const WORKSPACE_CONFIG_FILE: &str = "treeforge.toml";

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Compression used for file entries in the archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Deflated,
    Stored,
}

/// Export rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Minimum number of immediate children the root folder must hold
    #[serde(default = "default_min_root_children")]
    pub min_root_children: usize,

    /// Fail instead of picking the first top-level folder when several exist
    #[serde(default)]
    pub require_single_root: bool,

    #[serde(default)]
    pub compression: Compression,

    /// Directory the `<root>.zip` archive is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

pub(crate) fn default_min_root_children() -> usize {
    2
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            min_root_children: default_min_root_children(),
            require_single_root: false,
            compression: Compression::default(),
            output_dir: default_output_dir(),
        }
    }
}
