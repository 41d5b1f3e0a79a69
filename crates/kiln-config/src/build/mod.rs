//! Resolved build configuration handed to the bundler engine.

mod entry;
pub(crate) mod helpers;
mod output;
mod plugin;
mod resolution;
mod rules;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use entry::{DEFAULT_CHUNK, Entries};
pub use output::{FilenameTemplate, FilenameVars, OutputConfig};
pub use plugin::{
    CleanPluginOptions, CopyPattern, CopyPluginOptions, CssExtractOptions, DefinePluginOptions,
    HtmlMinifyOptions, HtmlPluginOptions, PluginInvocation, ProvidePluginOptions, ProvideSource,
};
pub use resolution::ResolveConfig;
pub use rules::{ModuleConfig, ModuleRule, Pattern, TransformStep};

use crate::dev::DevServerConfig;
use crate::error::{ConfigError, Result};
use crate::mode::Mode;

/// Fully merged configuration for one mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Entry chunks, in order
    #[serde(default)]
    pub entry: Entries,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub mode: Mode,

    /// Source map style (e.g. "cheap-module-eval-source-map")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtool: Option<String>,

    #[serde(default, alias = "devServer", skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerConfig>,

    #[serde(default)]
    pub resolve: ResolveConfig,

    #[serde(default)]
    pub module: ModuleConfig,

    /// Plugins in invocation order
    #[serde(default)]
    pub plugins: Vec<PluginInvocation>,
}

impl BuildConfig {
    /// Create from a merged serde_json::Value
    ///
    /// Plugin payloads are checked one by one first so a malformed plugin is
    /// reported with its position.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::BuildConfig;
    /// use serde_json::json;
    ///
    /// let config = BuildConfig::from_value(json!({
    ///     "entry": "./src/index.js",
    ///     "output": { "filename": "bundle.[hash].js" }
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.entry.modules().collect::<Vec<_>>(), vec!["./src/index.js"]);
    /// assert!(config.output.filename.is_hashed());
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        crate::config::check_plugin_payloads(&value)?;
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Rules whose patterns match `path`, in declaration order.
    pub fn rules_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ModuleRule> + 'a {
        self.module.rules.iter().filter(move |rule| rule.matches(path))
    }

    /// Whether hot module replacement is active, either through the dev
    /// server flag or an explicit plugin.
    pub fn hot_reload(&self) -> bool {
        self.dev_server.as_ref().is_some_and(|dev| dev.hot)
            || self
                .plugins
                .iter()
                .any(|plugin| matches!(plugin, PluginInvocation::HotModuleReplacement))
    }

    pub fn html_plugins(&self) -> impl Iterator<Item = &HtmlPluginOptions> {
        self.plugins.iter().filter_map(|plugin| match plugin {
            PluginInvocation::Html(options) => Some(options),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_fills_defaults() {
        let config = BuildConfig::from_value(json!({ "entry": ["./src/index.js"] })).unwrap();
        assert_eq!(config.mode, Mode::Production);
        assert_eq!(config.output.filename.as_str(), "main.js");
        assert_eq!(config.resolve.extensions, vec![".js", ".json"]);
        assert!(config.dev_server.is_none());
    }

    #[test]
    fn unknown_top_level_field_is_rejected() {
        let err = BuildConfig::from_value(json!({ "entry": "a.js", "optimisation": {} })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn rules_for_returns_matching_rules_in_order() {
        let config = BuildConfig::from_value(json!({
            "entry": "./src/index.js",
            "module": { "rules": [
                { "test": "\\.jsx?$", "use": "babel-loader", "exclude": "node_modules" },
                { "test": "\\.(le|c)ss$", "use": ["style-loader", "css-loader"] },
                { "test": "\\.js$", "use": "eslint-loader" }
            ]}
        }))
        .unwrap();

        let loaders: Vec<_> = config
            .rules_for("src/index.js")
            .flat_map(|rule| rule.loaders())
            .collect();
        assert_eq!(loaders, vec!["babel-loader", "eslint-loader"]);
        assert_eq!(config.rules_for("node_modules/x/index.js").count(), 1);
    }

    #[test]
    fn hot_reload_reads_dev_server_and_plugins() {
        let by_flag =
            BuildConfig::from_value(json!({ "entry": "a.js", "dev_server": { "hot": true } }))
                .unwrap();
        assert!(by_flag.hot_reload());

        let by_plugin = BuildConfig::from_value(json!({
            "entry": "a.js",
            "plugins": [{ "plugin": "hot-module-replacement" }]
        }))
        .unwrap();
        assert!(by_plugin.hot_reload());

        let neither = BuildConfig::from_value(json!({ "entry": "a.js" })).unwrap();
        assert!(!neither.hot_reload());
    }

    #[test]
    fn malformed_plugin_is_reported_by_position() {
        let err = BuildConfig::from_value(json!({
            "entry": "a.js",
            "plugins": [{ "plugin": "html", "template": "index.html" }, { "plugin": "html" }]
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPlugin { index: 1, .. }));
    }
}
