use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::build::helpers::{default_output_path, default_public_path};
use crate::error::ConfigError;

/// Where and how emitted bundles are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory (relative paths are taken from the project root)
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Bundle filename pattern, e.g. `bundle.[hash].js`
    #[serde(default)]
    pub filename: FilenameTemplate,

    /// Base URL the emitted assets are served from
    #[serde(default = "default_public_path", alias = "publicPath")]
    pub public_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            filename: FilenameTemplate::default(),
            public_path: default_public_path(),
        }
    }
}

impl OutputConfig {
    /// Output directory anchored at `root` when it is relative.
    pub fn absolute_path(&self, root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            root.join(&self.path)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    Ext,
    Hash(Option<usize>),
    ContentHash(Option<usize>),
}

/// Values substituted into a [`FilenameTemplate`].
#[derive(Debug, Clone, Default)]
pub struct FilenameVars<'a> {
    pub name: &'a str,
    pub ext: &'a str,
    pub hash: &'a str,
    pub content_hash: &'a str,
}

/// A parsed filename pattern with `[name]`, `[ext]`, `[hash]`, `[hash:N]`,
/// `[contenthash]` and `[contenthash:N]` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilenameTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl Default for FilenameTemplate {
    fn default() -> Self {
        Self {
            source: "main.js".to_string(),
            segments: vec![Segment::Literal("main.js".to_string())],
        }
    }
}

impl FilenameTemplate {
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidTemplate {
            template: source.to_string(),
            message,
        };

        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(open) = rest.find('[') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after
                .find(']')
                .ok_or_else(|| invalid("unterminated '[' placeholder".to_string()))?;
            segments.push(parse_placeholder(&after[..close]).map_err(invalid)?);
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        if segments.is_empty() {
            return Err(invalid("filename cannot be empty".to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern embeds a build or content hash.
    pub fn is_hashed(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Hash(_) | Segment::ContentHash(_)))
    }

    pub fn render(&self, vars: &FilenameVars<'_>) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Name => out.push_str(vars.name),
                Segment::Ext => out.push_str(vars.ext),
                Segment::Hash(len) => out.push_str(truncate(vars.hash, *len)),
                Segment::ContentHash(len) => out.push_str(truncate(vars.content_hash, *len)),
            }
        }
        out
    }
}

fn parse_placeholder(inner: &str) -> Result<Segment, String> {
    let (key, len) = match inner.split_once(':') {
        Some((key, len)) => {
            let len: usize = len
                .parse()
                .map_err(|_| format!("hash length '{len}' is not a number"))?;
            if len == 0 {
                return Err("hash length must be at least 1".to_string());
            }
            (key, Some(len))
        }
        None => (inner, None),
    };

    match (key, len) {
        ("name", None) => Ok(Segment::Name),
        ("ext", None) => Ok(Segment::Ext),
        ("hash", len) => Ok(Segment::Hash(len)),
        ("contenthash", len) => Ok(Segment::ContentHash(len)),
        ("name" | "ext", Some(_)) => Err(format!("[{key}] does not take a length")),
        _ => Err(format!("unknown placeholder '[{inner}]'")),
    }
}

fn truncate(value: &str, len: Option<usize>) -> &str {
    match len {
        Some(len) => value.get(..len).unwrap_or(value),
        None => value,
    }
}

impl TryFrom<String> for FilenameTemplate {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FilenameTemplate> for String {
    fn from(template: FilenameTemplate) -> Self {
        template.source
    }
}

impl fmt::Display for FilenameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
