use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::build::helpers::{default_clean_patterns, default_html_filename};

/// A plugin instantiation. The `plugin` field selects the kind and the
/// remaining fields are that kind's options. List order is invocation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginInvocation {
    /// Generate an HTML page from a template
    Html(HtmlPluginOptions),
    /// Empty the output directory before the build
    Clean(CleanPluginOptions),
    /// Copy static files into the output
    Copy(CopyPluginOptions),
    /// Inject module exports as free global symbols
    Provide(ProvidePluginOptions),
    /// Replace identifiers with compile-time constants
    Define(DefinePluginOptions),
    /// Extract stylesheets into separate files
    CssExtract(CssExtractOptions),
    /// Minimise extracted stylesheets
    OptimizeCss,
    /// Enable hot module replacement in the dev server
    HotModuleReplacement,
}

impl PluginInvocation {
    pub fn kind(&self) -> &'static str {
        match self {
            PluginInvocation::Html(_) => "html",
            PluginInvocation::Clean(_) => "clean",
            PluginInvocation::Copy(_) => "copy",
            PluginInvocation::Provide(_) => "provide",
            PluginInvocation::Define(_) => "define",
            PluginInvocation::CssExtract(_) => "css-extract",
            PluginInvocation::OptimizeCss => "optimize-css",
            PluginInvocation::HotModuleReplacement => "hot-module-replacement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HtmlPluginOptions {
    /// Template markup file, relative to the project root
    pub template: PathBuf,

    /// Emitted page name
    #[serde(default = "default_html_filename")]
    pub filename: String,

    /// Free-form values forwarded to the template
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub config: Value,

    #[serde(default)]
    pub minify: HtmlMinifyOptions,

    /// Append the build hash to injected asset URLs
    #[serde(default)]
    pub hash: bool,

    /// Restrict injected chunks (multi-page builds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HtmlMinifyOptions {
    #[serde(default, alias = "removeAttributeQuotes")]
    pub remove_attribute_quotes: bool,

    #[serde(default, alias = "collapseWhitespace")]
    pub collapse_whitespace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CleanPluginOptions {
    /// Globs removed before the first build; `!` prefixes keep matches
    #[serde(default = "default_clean_patterns", alias = "cleanOnceBeforeBuildPatterns")]
    pub clean_once_before_build_patterns: Vec<String>,
}

impl Default for CleanPluginOptions {
    fn default() -> Self {
        Self {
            clean_once_before_build_patterns: default_clean_patterns(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyPluginOptions {
    #[serde(default)]
    pub patterns: Vec<CopyPattern>,

    /// Globs skipped while copying
    #[serde(default)]
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyPattern {
    pub from: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<PathBuf>,

    /// Drop source directories, keeping only file names
    #[serde(default)]
    pub flatten: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidePluginOptions {
    /// Global identifier → module providing it
    #[serde(default)]
    pub symbols: IndexMap<String, ProvideSource>,
}

/// Either a whole module (`"jquery"`) or an export path inside one
/// (`["lodash", "map"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProvideSource {
    Module(String),
    Export(Vec<String>),
}

impl ProvideSource {
    pub fn module(&self) -> Option<&str> {
        match self {
            ProvideSource::Module(module) => Some(module.as_str()),
            ProvideSource::Export(path) => path.first().map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinePluginOptions {
    /// Identifier (dotted paths allowed) → replacement value
    #[serde(default)]
    pub constants: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CssExtractOptions {
    #[serde(default = "default_css_filename")]
    pub filename: String,

    #[serde(default, alias = "publicPath", skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,
}

impl Default for CssExtractOptions {
    fn default() -> Self {
        Self {
            filename: default_css_filename(),
            public_path: None,
        }
    }
}

fn default_css_filename() -> String {
    "[name].css".to_string()
}
