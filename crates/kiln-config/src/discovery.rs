//! File-based config discovery for CLI use
//!
//! Handles finding and loading Kiln configuration files from the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::Env;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::ConfigFile;
use crate::error::{ConfigError, Result};

const PACKAGE_FIELD: &str = "kiln";

/// Environment variable prefix for overrides (`KILN_OUTPUT__PATH=build`).
pub const ENV_PREFIX: &str = "KILN_";

/// File-based configuration discovery
///
/// Searches for Kiln configuration files in conventional locations and loads them.
/// This is primarily for CLI use - library users should use `ConfigFile::from_value()` directly.
///
/// # Example
///
/// ```no_run
/// use kiln_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let file = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    env_overrides: bool,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            env_overrides: false,
        }
    }

    /// Layer `KILN_*` environment variables over the loaded file.
    ///
    /// `__` separates nested keys, so `KILN_VARIANTS__DEVELOPMENT__DEV_SERVER__PORT=3000`
    /// sets `variants.development.dev_server.port`.
    pub fn with_env_overrides(mut self, enabled: bool) -> Self {
        self.env_overrides = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. kiln.toml
    /// 2. kiln.json
    /// 3. package.json (kiln field)
    pub fn find(&self) -> Option<PathBuf> {
        for name in ["kiln.toml", "kiln.json"] {
            let path = self.root.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load config from discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<ConfigFile> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Load config from a specific file path
    ///
    /// Relative paths are taken from the discovery root.
    pub fn load_from(&self, path: &Path) -> Result<ConfigFile> {
        let path = self.root.join(path);
        let mut value = read_value(&path)?;
        if self.env_overrides {
            apply_env(&mut value, Env::prefixed(ENV_PREFIX).split("__"));
        }
        ConfigFile::from_value(value)
    }
}

/// Load a config file by path, choosing the parser from its name.
pub fn load_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    ConfigFile::from_value(read_value(path.as_ref())?)
}

fn read_value(path: &Path) -> Result<Value> {
    if !path.is_file() {
        return Err(ConfigError::NotFound);
    }

    debug!(path = %path.display(), "loading config file");
    let content = fs::read_to_string(path)?;

    if path.file_name().is_some_and(|name| name == "package.json") {
        return package_field(&content);
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str::<Value>(&content).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: Some(format!("Invalid TOML syntax: {}", e.message())),
        }),
        Some("json") => serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
            field: "json".to_string(),
            hint: Some(format!("Invalid JSON: {e}")),
        }),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or_default().to_string(),
        )),
    }
}

fn package_field(content: &str) -> Result<Value> {
    let mut parsed: Value = serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: Some(format!("Invalid JSON: {e}")),
    })?;

    match parsed.get_mut(PACKAGE_FIELD).map(Value::take) {
        None => Err(ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: Some("Add a 'kiln' field to your package.json".to_string()),
        }),
        Some(Value::Null) => Err(ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: Some("The 'kiln' field cannot be null".to_string()),
        }),
        Some(field) => Ok(field),
    }
}

/// Write each environment pair into `value` at its dotted key path.
///
/// Values that parse as JSON (numbers, booleans, arrays) keep that type,
/// everything else is a string.
fn apply_env(value: &mut Value, env: Env) {
    for (key, raw) in env.iter() {
        let key = key.as_str().to_ascii_lowercase().replace("__", ".");
        let parsed = serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw));
        debug!(key = %key, "environment override");
        set_path(value, &key, parsed);
    }
}

fn set_path(value: &mut Value, dotted: &str, new: Value) {
    let mut current = value;
    let mut segments = dotted.split('.').peekable();
    while let Some(segment) = segments.next() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Value::Object(map) = current else {
            return;
        };
        if segments.peek().is_none() {
            map.insert(segment.to_string(), new);
            return;
        }
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}

/// Discover and load config from current directory (convenience function)
///
/// # Example
///
/// ```no_run
/// use kiln_config::discover;
///
/// let file = discover().unwrap();
/// ```
pub fn discover() -> Result<ConfigFile> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}
