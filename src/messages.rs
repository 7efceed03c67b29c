//! Message catalog
//!
//! Validation messages are addressed by dotted keys (`Role.Fields.Name.Required`)
//! and resolved through a catalog loaded from YAML. A key with no catalog
//! entry resolves to itself, so a bare catalog degrades to key-as-message —
//! which is also what the validator tests assert against. Entries keep file
//! order.

use anyhow::Context;
use indexmap::IndexMap;
use std::path::Path;

/// Key → template catalog. Templates may contain `{placeholder}` markers
/// substituted by [`Messages::format`].
#[derive(Debug, Clone, Default)]
pub struct Messages {
    entries: IndexMap<String, String>,
}

impl Messages {
    /// An empty catalog; every key resolves to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a YAML mapping of key to template.
    pub fn from_yaml_str(source: &str) -> anyhow::Result<Self> {
        let entries: IndexMap<String, String> =
            serde_yaml::from_str(source).context("failed to parse message catalog")?;
        Ok(Self { entries })
    }

    /// Load a catalog from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read message catalog {}", path.display()))?;
        Self::from_yaml_str(&source)
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    /// Resolve a key, falling back to the key itself.
    pub fn get(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Resolve a key and substitute `{name}` placeholders.
    pub fn format(&self, key: &str, args: &[(&str, String)]) -> String {
        let mut message = self.get(key);
        for (name, value) in args {
            message = message.replace(&format!("{{{name}}}"), value);
        }
        message
    }

    /// All entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
