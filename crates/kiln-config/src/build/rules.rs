use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::build::helpers::one_or_many;
use crate::error::ConfigError;

/// A compiled file path pattern.
///
/// Written as a plain regex (`\.jsx?$`) or as a slash-delimited literal with
/// optional `i`, `m` and `s` flags (`/\.css$/i`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, ConfigError> {
        let (body, flags) = split_literal(source);
        let regex_result = RegexBuilder::new(body)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build();

        let regex = regex_result.map_err(|err| ConfigError::InvalidPattern {
            pattern: source.to_string(),
            message: err.to_string(),
        })?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

fn split_literal(source: &str) -> (&str, &str) {
    if let Some(rest) = source.strip_prefix('/') {
        if let Some(close) = rest.rfind('/') {
            let flags = &rest[close + 1..];
            if close > 0 && flags.chars().all(|c| matches!(c, 'i' | 'm' | 's')) {
                return (&rest[..close], flags);
            }
        }
    }
    (source, "")
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl TryFrom<String> for Pattern {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Pattern::new(&value)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// One loader in a rule's transform chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StepRepr")]
pub struct TransformStep {
    pub loader: String,

    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StepRepr {
    Name(String),
    Full {
        loader: String,
        #[serde(default)]
        options: Value,
    },
}

impl From<StepRepr> for TransformStep {
    fn from(repr: StepRepr) -> Self {
        match repr {
            StepRepr::Name(loader) => Self {
                loader,
                options: Value::Null,
            },
            StepRepr::Full { loader, options } => Self { loader, options },
        }
    }
}

impl TransformStep {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: Value::Null,
        }
    }
}

/// Matches files by path and names the transform chain applied to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleRule {
    pub test: Pattern,

    /// Loaders applied in declaration order
    #[serde(rename = "use", default, deserialize_with = "one_or_many")]
    pub steps: Vec<TransformStep>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Pattern>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Pattern>,
}

impl ModuleRule {
    pub fn matches(&self, path: &str) -> bool {
        if !self.test.is_match(path) {
            return false;
        }
        if let Some(include) = &self.include {
            if !include.is_match(path) {
                return false;
            }
        }
        match &self.exclude {
            Some(exclude) => !exclude.is_match(path),
            None => true,
        }
    }

    pub fn loaders(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.loader.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    #[serde(default)]
    pub rules: Vec<ModuleRule>,
}
