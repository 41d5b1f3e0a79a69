//! Layer merging for variant overrides.
//!
//! Objects merge key by key, scalars are replaced, and arrays follow a
//! per-field [`ArrayPolicy`] looked up by dotted field path (`module.rules`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::error::{ConfigError, Result};

/// How an array in the variant layer combines with the base array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayPolicy {
    /// Variant array wins wholesale.
    Replace,
    /// Base items first, then variant items.
    Append,
    /// Items with an equal value under `key` are merged in place, the rest appended.
    MergeBy(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Strategy {
    Replace,
    Append,
    Merge,
}

/// Shape of one `[merge]` entry in a config file: either a bare strategy
/// name or a table with a `key` for keyed merging.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PolicyRepr {
    Bare(Strategy),
    Table {
        strategy: Strategy,
        #[serde(default)]
        key: Option<String>,
    },
}

impl ArrayPolicy {
    fn from_repr(field: &str, repr: PolicyRepr) -> Result<Self> {
        let (strategy, key) = match repr {
            PolicyRepr::Bare(strategy) => (strategy, None),
            PolicyRepr::Table { strategy, key } => (strategy, key),
        };

        match (strategy, key) {
            (Strategy::Replace, _) => Ok(ArrayPolicy::Replace),
            (Strategy::Append, _) => Ok(ArrayPolicy::Append),
            (Strategy::Merge, Some(key)) if !key.trim().is_empty() => Ok(ArrayPolicy::MergeBy(key)),
            (Strategy::Merge, _) => Err(ConfigError::InvalidMergePolicy {
                field: field.to_string(),
                message: "the merge strategy needs a non-empty 'key'".to_string(),
            }),
        }
    }
}

/// Per-field array merge table.
///
/// Defaults: `plugins` append, `module.rules` merge by `test`, everything else
/// is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePolicy {
    fields: IndexMap<String, ArrayPolicy>,
}

impl Default for MergePolicy {
    fn default() -> Self {
        let mut fields = IndexMap::new();
        fields.insert("plugins".to_string(), ArrayPolicy::Append);
        fields.insert(
            "module.rules".to_string(),
            ArrayPolicy::MergeBy("test".to_string()),
        );
        Self { fields }
    }
}

impl MergePolicy {
    /// Policy that replaces every array, the plain deep-merge behaviour.
    pub fn replace_all() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Build the default table overridden by a `[merge]` section value.
    pub fn from_value(value: &Value) -> Result<Self> {
        let mut policy = Self::default();
        let Value::Object(entries) = value else {
            if value.is_null() {
                return Ok(policy);
            }
            return Err(ConfigError::InvalidValue {
                field: "merge".to_string(),
                hint: Some("expected a table of field paths to strategies".to_string()),
            });
        };

        for (field, raw) in entries {
            let repr: PolicyRepr = serde_json::from_value(raw.clone()).map_err(|err| {
                ConfigError::InvalidMergePolicy {
                    field: field.clone(),
                    message: err.to_string(),
                }
            })?;
            policy.set(field.clone(), ArrayPolicy::from_repr(field, repr)?);
        }

        Ok(policy)
    }

    pub fn set(&mut self, field: impl Into<String>, policy: ArrayPolicy) {
        self.fields.insert(field.into(), policy);
    }

    pub fn array_policy(&self, field: &str) -> &ArrayPolicy {
        self.fields.get(field).unwrap_or(&ArrayPolicy::Replace)
    }

    /// Merge `update` onto `target` in place.
    pub fn merge(&self, target: &mut Value, update: &Value) {
        merge_at(target, update, "", self);
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn merge_at(target: &mut Value, update: &Value, path: &str, policy: &MergePolicy) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                let path = child_path(path, key);
                merge_at(
                    target_map.entry(key.clone()).or_insert(Value::Null),
                    value,
                    &path,
                    policy,
                );
            }
        }
        (Value::Array(target_items), Value::Array(update_items)) => {
            match policy.array_policy(path) {
                ArrayPolicy::Replace => *target_items = update_items.clone(),
                ArrayPolicy::Append => target_items.extend(update_items.iter().cloned()),
                ArrayPolicy::MergeBy(key) => {
                    for item in update_items {
                        let existing = item.get(key).and_then(|id| {
                            target_items
                                .iter_mut()
                                .find(|candidate| candidate.get(key) == Some(id))
                        });
                        match existing {
                            Some(slot) => {
                                trace!(field = path, key = %key, "merging keyed array item");
                                merge_at(slot, item, path, policy);
                            }
                            None => target_items.push(item.clone()),
                        }
                    }
                }
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
