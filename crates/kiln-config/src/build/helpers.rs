use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

// Helper defaults
pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_output_path() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_public_path() -> String {
    "/".to_string()
}

pub(crate) fn default_module_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("node_modules")]
}

pub(crate) fn default_extensions() -> Vec<String> {
    vec![".js".to_string(), ".json".to_string()]
}

pub(crate) fn default_html_filename() -> String {
    "index.html".to_string()
}

pub(crate) fn default_clean_patterns() -> Vec<String> {
    vec!["**/*".to_string()]
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    // Tried first: a struct can deserialize from a sequence.
    Many(Vec<T>),
    One(T),
}

/// Accept either a single value or a list of values.
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}

/// Whether `name` is a valid JavaScript identifier (ASCII subset plus `$`).
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_alphabetic() && first != '_' && first != '$' {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
