//! Layered configuration file: a shared base plus one variant per mode.
//!
//! This module provides `ConfigFile` and the variant merging logic.
//! For file discovery, see the `discovery` module.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::build::{BuildConfig, PluginInvocation};
use crate::error::{ConfigError, Result as ConfigResult};
use crate::merge::MergePolicy;
use crate::mode::Mode;
use crate::validation::{ConfigValidator, SchemaValidator};

const VARIANTS_KEY: &str = "variants";
const MERGE_KEY: &str = "merge";

/// A loaded but not yet resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    base: Map<String, Value>,
    variants: IndexMap<Mode, Value>,
    policy: MergePolicy,
}

impl ConfigFile {
    /// Create from serde_json::Value (for programmatic config from DB/API)
    ///
    /// Top-level keys form the base layer, except `variants` (one table per
    /// mode) and `merge` (array merge overrides).
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::{ConfigFile, Mode};
    /// use serde_json::json;
    ///
    /// let file = ConfigFile::from_value(json!({
    ///     "entry": "./src/index.js",
    ///     "variants": {
    ///         "development": { "dev_server": { "hot": true } },
    ///         "production": {}
    ///     }
    /// }))
    /// .unwrap();
    ///
    /// let config = file.resolve(Mode::Development).unwrap();
    /// assert!(config.dev_server.unwrap().hot);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        let Value::Object(mut base) = value else {
            return Err(ConfigError::InvalidValue {
                field: "config".to_string(),
                hint: Some("the configuration root must be a table".to_string()),
            });
        };

        let variants = match base.remove(VARIANTS_KEY) {
            None | Some(Value::Null) => IndexMap::new(),
            Some(Value::Object(raw)) => {
                let mut variants = IndexMap::with_capacity(raw.len());
                for (name, layer) in raw {
                    let mode: Mode = name.parse()?;
                    if !(layer.is_object() || layer.is_null()) {
                        return Err(ConfigError::InvalidValue {
                            field: format!("{VARIANTS_KEY}.{name}"),
                            hint: Some("a variant must be a table".to_string()),
                        });
                    }
                    variants.insert(mode, layer);
                }
                variants
            }
            Some(_) => {
                return Err(ConfigError::InvalidValue {
                    field: VARIANTS_KEY.to_string(),
                    hint: Some("expected a table keyed by mode".to_string()),
                });
            }
        };

        let policy = match base.remove(MERGE_KEY) {
            Some(raw) => MergePolicy::from_value(&raw)?,
            None => MergePolicy::default(),
        };

        Ok(Self {
            base,
            variants,
            policy,
        })
    }

    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &MergePolicy {
        &self.policy
    }

    pub fn base(&self) -> &Map<String, Value> {
        &self.base
    }

    pub fn variant(&self, mode: Mode) -> Option<&Value> {
        self.variants.get(&mode)
    }

    /// Modes that have a variant declared, in declaration order.
    pub fn declared_modes(&self) -> impl Iterator<Item = Mode> + '_ {
        self.variants.keys().copied()
    }

    /// Merge the variant for `mode` onto the base layer.
    ///
    /// The variant's `mode` field defaults to the requested mode, so the
    /// merged value always names the mode it was resolved for unless the
    /// variant says otherwise.
    pub fn merged(&self, mode: Mode) -> ConfigResult<Value> {
        let variant = self
            .variants
            .get(&mode)
            .ok_or(ConfigError::MissingVariant { mode })?;

        let mut layer = match variant {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        layer
            .entry("mode")
            .or_insert_with(|| Value::String(mode.as_str().to_string()));

        debug!(%mode, keys = layer.len(), "merging variant onto base");

        let mut merged = Value::Object(self.base.clone());
        self.policy.merge(&mut merged, &Value::Object(layer));
        Ok(merged)
    }

    /// Resolve for `mode` with schema validation only (no filesystem checks).
    ///
    /// Use [`crate::Resolver`] when entries and templates must exist on disk.
    pub fn resolve(&self, mode: Mode) -> ConfigResult<BuildConfig> {
        let merged = self.merged(mode)?;
        let config = BuildConfig::from_value(merged)?;
        SchemaValidator.validate(&config)?;
        Ok(config)
    }
}

/// Check every plugin payload on its own so a bad entry is reported by position.
pub(crate) fn check_plugin_payloads(merged: &Value) -> ConfigResult<()> {
    let Some(plugins) = merged.get("plugins") else {
        return Ok(());
    };
    let Some(items) = plugins.as_array() else {
        return Err(ConfigError::InvalidValue {
            field: "plugins".to_string(),
            hint: Some("expected a list of plugin tables".to_string()),
        });
    };

    for (index, item) in items.iter().enumerate() {
        serde_json::from_value::<PluginInvocation>(item.clone()).map_err(|err| {
            ConfigError::InvalidPlugin {
                index,
                message: err.to_string(),
            }
        })?;
    }

    Ok(())
}
