//! Error handling for the Kiln CLI.
//!
//! `CliError` wraps the resolver's `ConfigError` and the I/O and
//! serialization failures of the command layer. `#[from]` conversions keep
//! command code on `?`, and [`ResultExt`] maps missing files to
//! [`CliError::FileNotFound`].
//!
//! # Example
//!
//! ```rust,no_run
//! use kiln_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_config(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod miette;

pub use self::miette::cli_error_to_miette;

use std::path::PathBuf;
use thiserror::Error;

pub use kiln_config::ConfigError;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Resolution, merging or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// One or more variants failed `kiln check`
    #[error("{failed} of {total} variants failed validation")]
    CheckFailed {
        /// Variants that did not resolve
        failed: usize,
        /// Variants declared in the file
        total: usize,
    },
}

impl CliError {
    /// Actionable hint, when one is known.
    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::Config(ConfigError::NotFound) => {
                Some("Create kiln.toml, kiln.json or a \"kiln\" field in package.json, or pass --config")
            }
            CliError::Config(err) => err.hint(),
            CliError::CheckFailed { .. } => Some("Run with --verbose to see each merge step"),
            _ => None,
        }
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            CliError::Config(ConfigError::NotFound) => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}
