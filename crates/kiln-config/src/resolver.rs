//! Mode-driven resolution of a loaded configuration file.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::build::BuildConfig;
use crate::config::ConfigFile;
use crate::discovery::ConfigDiscovery;
use crate::error::Result;
use crate::mode::Mode;
use crate::validation::{ConfigValidator, FsValidator, SchemaValidator};

/// Turns a [`ConfigFile`] into the [`BuildConfig`] for one mode.
///
/// The resolver owns the project root: entry modules and plugin templates
/// are checked against it unless [`Resolver::schema_only`] is used.
///
/// # Example
///
/// ```no_run
/// use kiln_config::{ConfigDiscovery, Mode, Resolver};
///
/// let file = ConfigDiscovery::new(".").load().unwrap();
/// let config = Resolver::new(".").resolve(&file, Mode::Development).unwrap();
/// assert!(config.hot_reload());
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
    check_files: bool,
    absolute_output: bool,
}

impl Resolver {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            check_files: true,
            absolute_output: false,
        }
    }

    /// Skip filesystem checks (entries, templates).
    pub fn schema_only(mut self) -> Self {
        self.check_files = false;
        self
    }

    /// Rewrite `output.path` relative to the root.
    pub fn absolute_output(mut self, enabled: bool) -> Self {
        self.absolute_output = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Merge the variant for `mode` onto the base and validate the result.
    pub fn resolve(&self, file: &ConfigFile, mode: Mode) -> Result<BuildConfig> {
        let merged = file.merged(mode)?;
        let mut config = BuildConfig::from_value(merged)?;

        if self.check_files {
            FsValidator::new(&self.root).validate(&config)?;
        } else {
            SchemaValidator.validate(&config)?;
        }

        if self.absolute_output {
            config.output.path = config.output.absolute_path(&self.root);
        }

        info!(
            %mode,
            entries = config.entry.len(),
            rules = config.module.rules.len(),
            plugins = config.plugins.len(),
            "resolved build configuration"
        );
        Ok(config)
    }

    /// Resolve for a mode given by name, e.g. from a command line flag.
    ///
    /// Names other than `development` and `production` fail with
    /// [`crate::ConfigError::UnknownMode`].
    pub fn resolve_named(&self, file: &ConfigFile, mode: &str) -> Result<BuildConfig> {
        let mode: Mode = mode.parse()?;
        self.resolve(file, mode)
    }

    /// Resolve every declared variant, in declaration order.
    pub fn resolve_all(&self, file: &ConfigFile) -> Vec<(Mode, Result<BuildConfig>)> {
        file.declared_modes()
            .map(|mode| {
                debug!(%mode, "resolving declared variant");
                (mode, self.resolve(file, mode))
            })
            .collect()
    }
}

/// Discover the config under `root` and resolve it for `mode`.
///
/// # Example
///
/// ```no_run
/// use kiln_config::{resolve, Mode};
///
/// let config = resolve(".", Mode::Production).unwrap();
/// println!("{}", config.output.filename);
/// ```
pub fn resolve(root: impl AsRef<Path>, mode: Mode) -> Result<BuildConfig> {
    let root = root.as_ref();
    let file = ConfigDiscovery::new(root).load()?;
    Resolver::new(root).resolve(&file, mode)
}
