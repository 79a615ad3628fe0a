//! Display metadata attached to properties.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "Misc";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Human-facing name, description and category of a property.
///
/// The category is carried on descriptors but not rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
}

impl DisplayInfo {
    /// Create metadata with only a display name.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            description: String::new(),
            category: default_category(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Source of display metadata, keyed by member or property name.
pub trait MetadataProvider {
    fn lookup(&self, name: &str) -> Option<DisplayInfo>;
}

/// Provider that never has metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;
impl MetadataProvider for NoMetadata {
    fn lookup(&self, _name: &str) -> Option<DisplayInfo> {
        None
    }
}

impl<F> MetadataProvider for F
where
    F: Fn(&str) -> Option<DisplayInfo>,
{
    fn lookup(&self, name: &str) -> Option<DisplayInfo> {
        self(name)
    }
}

/// In-memory metadata table, loadable from JSON.
///
/// The JSON form is an object mapping names to entries:
///
/// ```json
/// { "SizeMode": { "display_name": "Size mode", "category": "Layout" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataTable {
    entries: HashMap<String, DisplayInfo>,
}

impl MetadataTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, info: DisplayInfo) {
        self.entries.insert(name.into(), info);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, info: DisplayInfo) -> Self {
        self.insert(name, info);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a table from JSON.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl MetadataProvider for MetadataTable {
    fn lookup(&self, name: &str) -> Option<DisplayInfo> {
        self.entries.get(name).cloned()
    }
}

/// Resolve the metadata for one surface member.
///
/// Inline metadata wins, then the provider keyed by the member's own name,
/// then the provider keyed by the canonical property name.
pub(crate) fn resolve(
    inline: Option<&DisplayInfo>,
    provider: &dyn MetadataProvider,
    member: &str,
    canonical: &str,
) -> Option<DisplayInfo> {
    inline
        .cloned()
        .or_else(|| provider.lookup(member))
        .or_else(|| provider.lookup(canonical))
}
