//! Development server configuration types.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::build::helpers::default_true;
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    /// Listening port; `"3000"` and `3000` are both accepted
    #[serde(default = "default_port", deserialize_with = "port_number")]
    pub port: u16,

    /// Hot module replacement
    #[serde(default)]
    pub hot: bool,

    /// Inline client script (false switches to iframe mode)
    #[serde(default = "default_true")]
    pub inline: bool,

    #[serde(default)]
    pub quiet: bool,

    /// Show compile errors as a full-screen overlay
    #[serde(default)]
    pub overlay: bool,

    /// gzip responses
    #[serde(default)]
    pub compress: bool,

    #[serde(default)]
    pub stats: StatsPreset,

    #[serde(default, alias = "clientLogLevel")]
    pub client_log_level: ClientLogLevel,

    /// URL prefix → forwarding rule
    #[serde(default)]
    pub proxy: IndexMap<String, ProxyRule>,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            hot: false,
            inline: true,
            quiet: false,
            overlay: false,
            compress: false,
            stats: StatsPreset::default(),
            client_log_level: ClientLogLevel::default(),
            proxy: IndexMap::new(),
        }
    }
}

impl DevServerConfig {
    /// The proxy rule with the longest prefix matching `path`.
    pub fn proxy_for(&self, path: &str) -> Option<(&str, &ProxyRule)> {
        self.proxy
            .iter()
            .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(prefix, rule)| (prefix.as_str(), rule))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyRule {
    /// Origin requests are forwarded to
    pub target: String,

    /// Path prefix → replacement applied before forwarding
    #[serde(default, alias = "pathRewrite")]
    pub path_rewrite: IndexMap<String, String>,

    /// Rewrite the Host header to the target origin
    #[serde(default, alias = "changeOrigin")]
    pub change_origin: bool,

    /// Proxy websocket upgrades
    #[serde(default)]
    pub ws: bool,
}

impl ProxyRule {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            path_rewrite: IndexMap::new(),
            change_origin: false,
            ws: false,
        }
    }

    pub fn with_rewrite(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.path_rewrite.insert(from.into(), to.into());
        self
    }

    /// Parse the target as an absolute http(s)/ws(s) URL with a host.
    pub fn target_url(&self, prefix: &str) -> Result<Url> {
        let invalid = |message: String| ConfigError::InvalidProxy {
            prefix: prefix.to_string(),
            message,
        };

        let url = Url::parse(&self.target)
            .map_err(|err| invalid(format!("target '{}' is not a URL: {err}", self.target)))?;

        if !matches!(url.scheme(), "http" | "https" | "ws" | "wss") {
            return Err(invalid(format!(
                "target scheme '{}' is not http, https, ws or wss",
                url.scheme()
            )));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid(format!("target '{}' has no host", self.target)));
        }

        Ok(url)
    }

    /// Apply the first matching path rewrite. A leading `^` on a key is an
    /// anchor and is ignored.
    pub fn rewrite(&self, path: &str) -> String {
        for (from, to) in &self.path_rewrite {
            let from = rewrite_prefix(from);
            if let Some(rest) = path.strip_prefix(from) {
                return format!("{to}{rest}");
            }
        }
        path.to_string()
    }
}

pub(crate) fn rewrite_prefix(key: &str) -> &str {
    key.strip_prefix('^').unwrap_or(key)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatsPreset {
    ErrorsOnly,
    Minimal,
    #[default]
    Normal,
    Verbose,
    None,
}

/// Browser console verbosity of the dev client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientLogLevel {
    Silent,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_host() -> String {
    "localhost".into()
}

fn default_port() -> u16 {
    8080
}

fn port_number<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortRepr {
        Number(u16),
        Text(String),
    }

    match PortRepr::deserialize(deserializer)? {
        PortRepr::Number(port) => Ok(port),
        PortRepr::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid port '{text}'"))),
    }
}
