use std::borrow::Cow;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::build::helpers::{default_extensions, default_module_roots};

/// Module lookup settings: search roots, aliases and extension order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveConfig {
    /// Directories searched for bare module requests, left to right
    #[serde(default = "default_module_roots")]
    pub modules: Vec<PathBuf>,

    /// Request prefix → replacement (e.g. "react-native" → "@my/react-native-web").
    /// A key ending in `$` only matches the request exactly.
    #[serde(default)]
    pub alias: IndexMap<String, String>,

    /// Suffixes tried in order when a request names no existing file
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            modules: default_module_roots(),
            alias: IndexMap::new(),
            extensions: default_extensions(),
        }
    }
}

impl ResolveConfig {
    /// Add an alias, replacing any existing entry for the same key.
    pub fn with_alias(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.alias.insert(name.into(), target.into());
        self
    }

    /// Extensions with a leading dot, in declared order.
    ///
    /// `web.js` is treated as `.web.js`.
    pub fn normalized_extensions(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.extensions.iter().map(|ext| {
            if ext.starts_with('.') {
                Cow::Borrowed(ext.as_str())
            } else {
                Cow::Owned(format!(".{ext}"))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_gain_leading_dot() {
        let config = ResolveConfig {
            extensions: vec!["web.js".to_string(), ".js".to_string()],
            ..Default::default()
        };
        let normalized: Vec<_> = config.normalized_extensions().collect();
        assert_eq!(normalized, vec![".web.js", ".js"]);
    }
}
