//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for library use).

use std::path::{Path, PathBuf};

use crate::build::helpers::is_identifier;
use crate::build::{BuildConfig, Entries, HtmlPluginOptions, PluginInvocation};
use crate::dev::{DevServerConfig, rewrite_prefix};
use crate::error::{ConfigError, ResourceKind, Result};
use crate::lookup::ModuleResolver;

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// Use this for library use cases where files are in-memory or virtual.
///
/// # Example
///
/// ```
/// use kiln_config::{BuildConfig, ConfigValidator, Entries, SchemaValidator};
///
/// let mut config = BuildConfig::default();
/// config.entry = Entries::main(["./src/index.js"]);
///
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        if config.entry.is_empty() {
            return Err(ConfigError::NoEntries);
        }
        validate_entries(&config.entry)?;

        if config.output.path.as_os_str().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "output path cannot be empty".to_string(),
                hint: Some("Set output.path, e.g. \"dist\"".to_string()),
            });
        }

        validate_resolve(config)?;

        if let Some(dev) = &config.dev_server {
            validate_dev_server(dev)?;
        }

        for (index, plugin) in config.plugins.iter().enumerate() {
            validate_plugin(plugin)?;
            if let PluginInvocation::Html(options) = plugin {
                validate_chunks(index, options, &config.entry)?;
            }
        }

        Ok(())
    }
}

fn validate_entries(entries: &Entries) -> Result<()> {
    for (name, modules) in entries.iter() {
        if name.trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "entry chunk names cannot be empty".to_string(),
                hint: None,
            });
        }
        if modules.is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: format!("entry chunk '{name}' has no modules"),
                hint: Some(format!("Give '{name}' a module path or remove it")),
            });
        }
        if modules.iter().any(|module| module.trim().is_empty()) {
            return Err(ConfigError::SchemaValidation {
                message: "entry paths cannot be empty".to_string(),
                hint: Some("Remove empty strings from 'entry'".to_string()),
            });
        }
    }
    Ok(())
}

/// Every chunk an html page injects must be an entry chunk.
fn validate_chunks(index: usize, options: &HtmlPluginOptions, entries: &Entries) -> Result<()> {
    let Some(chunks) = &options.chunks else {
        return Ok(());
    };
    match chunks.iter().find(|chunk| !entries.contains(chunk)) {
        Some(missing) => Err(ConfigError::InvalidPlugin {
            index,
            message: format!(
                "html page '{}' injects chunk '{missing}', but entry declares: {}",
                options.filename,
                entries.names().collect::<Vec<_>>().join(", ")
            ),
        }),
        None => Ok(()),
    }
}

fn validate_resolve(config: &BuildConfig) -> Result<()> {
    for (key, target) in &config.resolve.alias {
        let name = key.strip_suffix('$').unwrap_or(key);
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidAlias {
                key: key.clone(),
                message: "alias name cannot be empty".to_string(),
            });
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidAlias {
                key: key.clone(),
                message: "alias name cannot contain whitespace".to_string(),
            });
        }
        if target.trim().is_empty() {
            return Err(ConfigError::InvalidAlias {
                key: key.clone(),
                message: "replacement path cannot be empty".to_string(),
            });
        }
    }

    if config.resolve.extensions.iter().any(|ext| ext.trim_matches('.').trim().is_empty()) {
        return Err(ConfigError::SchemaValidation {
            message: "resolve.extensions contains an empty suffix".to_string(),
            hint: Some("Use suffixes like \".js\" or \"web.js\"".to_string()),
        });
    }

    if config.resolve.modules.iter().any(|root| root.as_os_str().is_empty()) {
        return Err(ConfigError::SchemaValidation {
            message: "resolve.modules contains an empty directory".to_string(),
            hint: None,
        });
    }

    Ok(())
}

fn validate_dev_server(dev: &DevServerConfig) -> Result<()> {
    if dev.port == 0 {
        return Err(ConfigError::SchemaValidation {
            message: "dev_server.port must be between 1 and 65535".to_string(),
            hint: None,
        });
    }

    for (prefix, rule) in &dev.proxy {
        if !prefix.starts_with('/') {
            return Err(ConfigError::InvalidProxy {
                prefix: prefix.clone(),
                message: "URL prefix must start with '/'".to_string(),
            });
        }

        rule.target_url(prefix)?;

        for key in rule.path_rewrite.keys() {
            let from = rewrite_prefix(key);
            // A key that is neither a prefix of the rule nor an extension of it
            // can never apply to a request routed through this rule.
            if !(prefix.starts_with(from) || from.starts_with(prefix.as_str())) {
                return Err(ConfigError::InvalidProxy {
                    prefix: prefix.clone(),
                    message: format!("path rewrite '{key}' can never match requests under '{prefix}'"),
                });
            }
        }
    }

    Ok(())
}

fn validate_plugin(plugin: &PluginInvocation) -> Result<()> {
    let schema_error = |message: String| ConfigError::SchemaValidation {
        message: format!("{} plugin: {message}", plugin.kind()),
        hint: None,
    };

    match plugin {
        PluginInvocation::Html(options) => {
            if options.template.as_os_str().is_empty() {
                return Err(schema_error("template path cannot be empty".to_string()));
            }
            if options.filename.trim().is_empty() {
                return Err(schema_error("filename cannot be empty".to_string()));
            }
        }
        PluginInvocation::Copy(options) => {
            if options.patterns.iter().any(|p| p.from.trim().is_empty()) {
                return Err(schema_error("every pattern needs a 'from' path".to_string()));
            }
        }
        PluginInvocation::Provide(options) => {
            for (name, source) in &options.symbols {
                if !is_identifier(name) {
                    return Err(schema_error(format!("'{name}' is not a valid identifier")));
                }
                if source.module().is_none_or(|module| module.trim().is_empty()) {
                    return Err(schema_error(format!("'{name}' has no source module")));
                }
            }
        }
        PluginInvocation::Define(options) => {
            for name in options.constants.keys() {
                if !name.split('.').all(is_identifier) {
                    return Err(schema_error(format!("'{name}' is not a valid identifier path")));
                }
            }
        }
        PluginInvocation::CssExtract(options) => {
            if options.filename.trim().is_empty() {
                return Err(schema_error("filename cannot be empty".to_string()));
            }
        }
        PluginInvocation::Clean(_)
        | PluginInvocation::OptimizeCss
        | PluginInvocation::HotModuleReplacement => {}
    }

    Ok(())
}

/// Filesystem validator (for CLI use)
///
/// Validates that entry modules and HTML templates exist on disk.
///
/// # Example
///
/// ```no_run
/// use kiln_config::{BuildConfig, ConfigValidator, Entries, FsValidator};
///
/// let mut config = BuildConfig::default();
/// config.entry = Entries::main(["./src/index.js"]);
///
/// let validator = FsValidator::new(".");
/// validator.validate(&config).unwrap();
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        // First run schema validation
        SchemaValidator.validate(config)?;

        // Entries go through the same lookup rules as imports
        let resolver = ModuleResolver::new(&config.resolve, &self.root);
        for entry in config.entry.modules() {
            resolver
                .resolve(entry)
                .map_err(|_| ConfigError::ResourceNotFound {
                    kind: ResourceKind::Entry,
                    path: self.root.join(entry),
                })?;
        }

        for html in config.html_plugins() {
            let path = self.root.join(&html.template);
            if !path.is_file() {
                return Err(ConfigError::ResourceNotFound {
                    kind: ResourceKind::Template,
                    path,
                });
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &BuildConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &BuildConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
