//! Platform directories for config and log files.

use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "treeforge", "treeforge")
}

/// Global config file, e.g. `~/.config/treeforge/config.toml` on Linux
pub fn global_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Platform state directory; falls back to the data-local dir where the
/// platform has no notion of state (macOS, Windows)
pub fn state_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| {
        dirs.state_dir()
            .unwrap_or_else(|| dirs.data_local_dir())
            .to_path_buf()
    })
}
