//! Name → schema lookup table.
//!
//! Built once per imported collection and read-only afterwards, so one table
//! can serve any number of concurrent resolutions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One named member of a schema collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub name: String,
    pub schema: Value,
}

impl SchemaEntry {
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// Lookup table over a collection of [`SchemaEntry`].
///
/// Entries are kept in display order (case-insensitive by name, exact name as
/// tie-breaker); lookup goes through a hash index.
#[derive(Debug, Clone, Default)]
pub struct SchemaTable {
    entries: Vec<SchemaEntry>,
    index: HashMap<String, usize>,
}

impl SchemaTable {
    /// Build a table. A later entry with an already-seen name replaces the
    /// earlier one.
    pub fn from_entries(entries: impl IntoIterator<Item = SchemaEntry>) -> Self {
        let mut unique: HashMap<String, SchemaEntry> = HashMap::new();
        for entry in entries {
            unique.insert(entry.name.clone(), entry);
        }

        let mut entries: Vec<SchemaEntry> = unique.into_values().collect();
        entries.sort_by(|a, b| display_order(&a.name, &b.name));

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();

        Self { entries, index }
    }

    /// Build a table from a `{ name: schema }` object, e.g. `components.schemas`.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self::from_entries(
            map.iter()
                .map(|(name, schema)| SchemaEntry::new(name.clone(), schema.clone())),
        )
    }

    pub fn find(&self, name: &str) -> Option<&Value> {
        self.index.get(name).map(|&i| &self.entries[i].schema)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Entries whose name contains `query`, ignoring case.
    pub fn filter<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a SchemaEntry> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(move |e| e.name.to_lowercase().contains(&query))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn display_order(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
