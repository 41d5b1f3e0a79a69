//! Mode-aware configuration for front-end bundler builds.
//!
//! A configuration file declares a shared base and one variant per [`Mode`].
//! Resolving merges the selected variant onto the base and yields a typed,
//! validated [`BuildConfig`].

pub mod build;
pub mod config;
pub mod dev;
pub mod discovery;
pub mod error;
pub mod lookup;
pub mod merge;
pub mod mode;
pub mod resolver;
pub mod validation;

// Re-export main types
pub use build::*;
pub use config::ConfigFile;
pub use dev::*;
pub use error::*;
pub use lookup::ModuleResolver;
pub use merge::{ArrayPolicy, MergePolicy};
pub use mode::Mode;
pub use resolver::{Resolver, resolve};

// Re-export discovery and validation
pub use discovery::{ConfigDiscovery, ENV_PREFIX, discover, load_path};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
