//! ConfigLoader facade delegating to the merge service.

use super::merge::service::MergeService;
use super::ForgeConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file, the workspace file and environment.
    pub fn load(workspace_root: &Path) -> Result<ForgeConfig, ConfigError> {
        MergeService::load(workspace_root)
    }

    /// Load configuration from one explicit file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ForgeConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> ForgeConfig {
        ForgeConfig::default()
    }
}
