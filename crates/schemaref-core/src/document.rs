//! The self-contained output of a definitions-mode resolution.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::ResolveError;
use crate::reference::DEFS_REF_PREFIX;

/// `{ "$schema": …, "$ref": "#/$defs/<root>", "$defs": { … } }`
///
/// `defs` holds one entry per name reachable from the root, in the order
/// their materialization finished. Entry bodies may still carry a `$schema`
/// keyword from conversion; it is dropped when the document is serialized,
/// since it is only meaningful at the document root.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionsDocument {
    /// Value of the root `$schema` keyword.
    pub draft: String,
    /// Name of the schema this document was resolved for.
    pub root: String,
    /// Materialized definitions, keyed by schema name.
    pub defs: Map<String, Value>,
    /// Names referenced somewhere in the closure but absent from the
    /// collection. Sorted and deduplicated; not part of the serialized form.
    pub missing_refs: Vec<String>,
}

impl DefinitionsDocument {
    /// `#/$defs/<root>`
    pub fn root_ref(&self) -> String {
        format!("{DEFS_REF_PREFIX}{}", self.root)
    }

    /// Names present in `$defs`, in emission order.
    pub fn def_names(&self) -> impl Iterator<Item = &str> {
        self.defs.keys().map(String::as_str)
    }

    /// Serialized form as a JSON tree.
    pub fn to_value(&self) -> Result<Value, ResolveError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialized form as indented JSON text.
    pub fn to_json_pretty(&self) -> Result<String, ResolveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for DefinitionsDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("$schema", &self.draft)?;
        map.serialize_entry("$ref", &self.root_ref())?;
        map.serialize_entry("$defs", &DefsTable(&self.defs))?;
        map.end()
    }
}

struct DefsTable<'a>(&'a Map<String, Value>);

impl Serialize for DefsTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, body) in self.0 {
            map.serialize_entry(name, &NestedDefinition(body))?;
        }
        map.end()
    }
}

/// A `$defs` entry with its own `$schema` keyword skipped.
struct NestedDefinition<'a>(&'a Value);

impl Serialize for NestedDefinition<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(obj) if obj.contains_key("$schema") => {
                let mut map = serializer.serialize_map(Some(obj.len() - 1))?;
                for (key, value) in obj.iter().filter(|(k, _)| *k != "$schema") {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            other => other.serialize(serializer),
        }
    }
}
