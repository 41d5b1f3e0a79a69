//! Shared utilities for command implementations.

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result, ResultExt};
use kiln_config::{ConfigDiscovery, ConfigFile};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a path relative to a working directory.
///
/// If the path is absolute, returns it unchanged. Otherwise, joins it with
/// the working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {}", e),
        ))
    })
}

/// Project root from `--root`, relative to the current directory.
pub fn project_root(project: &ProjectArgs) -> Result<PathBuf> {
    let cwd = get_cwd()?;
    let root = match &project.root {
        Some(root) => resolve_path(root, &cwd),
        None => cwd,
    };
    if !root.is_dir() {
        return Err(CliError::FileNotFound(root));
    }
    Ok(root)
}

/// Load the configuration named by `--config`, or discover one in the root.
pub fn load_config(project: &ProjectArgs, root: &Path) -> Result<ConfigFile> {
    let discovery = ConfigDiscovery::new(root).with_env_overrides(project.env_overrides);

    match &project.config {
        Some(path) => {
            let path = resolve_path(path, &get_cwd()?);
            debug!(path = %path.display(), "loading explicit config");
            discovery.load_from(&path).with_path(&path)
        }
        None => Ok(discovery.load()?),
    }
}
