use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Chunk name given to entries declared as a string or a list.
pub const DEFAULT_CHUNK: &str = "main";

/// Entry chunks in declaration order: chunk name → module specifiers.
///
/// Accepts `"./src/index.js"`, `["./a.js", "./b.js"]` (both become the
/// `main` chunk) or a table of named chunks such as
/// `{ index = "./src/index.js", login = "./src/login.js" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Entries(IndexMap<String, Vec<String>>);

impl Entries {
    /// A single `main` chunk built from `modules`.
    pub fn main<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut chunks = IndexMap::new();
        chunks.insert(
            DEFAULT_CHUNK.to_string(),
            modules.into_iter().map(Into::into).collect(),
        );
        Self(chunks)
    }

    /// Add or replace a named chunk.
    pub fn with_chunk<I, S>(mut self, name: impl Into<String>, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(name.into(), modules.into_iter().map(Into::into).collect());
        self
    }

    /// True when no chunk declares a module.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn chunk(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Every module specifier, chunk by chunk.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(name, modules)| (name.as_str(), modules.as_slice()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChunkModules {
    One(String),
    Many(Vec<String>),
}

impl From<ChunkModules> for Vec<String> {
    fn from(modules: ChunkModules) -> Self {
        match modules {
            ChunkModules::One(module) => vec![module],
            ChunkModules::Many(modules) => modules,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryForm {
    Unnamed(ChunkModules),
    Named(IndexMap<String, ChunkModules>),
}

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match EntryForm::deserialize(deserializer)? {
            EntryForm::Unnamed(modules) => Entries::main(Vec::from(modules)),
            EntryForm::Named(chunks) => Entries(
                chunks
                    .into_iter()
                    .map(|(name, modules)| (name, modules.into()))
                    .collect(),
            ),
        })
    }
}
