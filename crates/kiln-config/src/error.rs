//! Error types for configuration loading, merging and validation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::mode::Mode;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// What kind of on-disk resource a configuration referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Entry,
    Template,
    Module,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResourceKind::Entry => "entry module",
            ResourceKind::Template => "template file",
            ResourceKind::Module => "module",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    // Mode selection
    #[error("unknown mode '{0}' (expected 'development' or 'production')")]
    UnknownMode(String),

    #[error("no variant declared for mode '{mode}'")]
    MissingVariant { mode: Mode },

    // Malformed declarations
    #[error("invalid alias '{key}': {message}")]
    InvalidAlias { key: String, message: String },

    #[error("invalid proxy rule '{prefix}': {message}")]
    InvalidProxy { prefix: String, message: String },

    #[error("invalid rule pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("invalid filename template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    #[error("invalid plugin at position {index}: {message}")]
    InvalidPlugin { index: usize, message: String },

    #[error("invalid merge policy for '{field}': {message}")]
    InvalidMergePolicy { field: String, message: String },

    // Referenced files
    #[error("{kind} not found: {}", .path.display())]
    ResourceNotFound { kind: ResourceKind, path: PathBuf },

    // Config parsing/loading errors
    #[error("config not found")]
    NotFound,

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config value for '{field}'{}", .hint.as_deref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    // Schema validation errors (no filesystem checks)
    #[error("no entries specified")]
    NoEntries,

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Actionable hint for the user, when the error carries one.
    pub fn hint(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { hint, .. } | ConfigError::SchemaValidation { hint, .. } => {
                hint.as_deref()
            }
            ConfigError::MissingVariant { .. } => {
                Some("Declare the variant under [variants.<mode>] in the config file")
            }
            ConfigError::NoEntries => Some("Add at least one path to 'entry'"),
            _ => None,
        }
    }

    /// Whether the error stems from a missing file rather than bad configuration.
    pub fn is_resource_not_found(&self) -> bool {
        matches!(self, ConfigError::ResourceNotFound { .. })
    }
}
