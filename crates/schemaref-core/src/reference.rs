//! Recognition and construction of `$ref` nodes.
//!
//! Component schemas point at each other with `#/components/schemas/<name>`.
//! Anything else stored under `$ref` is a *foreign* reference: it is carried
//! through resolution untouched.

use serde_json::{Map, Value};

/// Prefix of a reference to another entry of the same collection.
pub const LOCAL_REF_PREFIX: &str = "#/components/schemas/";

/// Prefix of a reference into the `$defs` table of a resolved document.
pub const DEFS_REF_PREFIX: &str = "#/$defs/";

/// Reference to the whole document being produced.
pub const ROOT_ANCHOR: &str = "#";

/// Classification of an object node carrying a string `$ref`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    /// `#/components/schemas/<name>`; holds `<name>`.
    Local(&'a str),
    /// Any other `$ref` string, kept verbatim.
    Foreign(&'a str),
}

/// Classify `node` as a reference, if it is one.
///
/// Only objects whose `$ref` member is a string qualify. Sibling keys do not
/// change the outcome: a `$ref` replaces its whole object.
pub fn classify(node: &Value) -> Option<Reference<'_>> {
    let target = node.as_object()?.get("$ref")?.as_str()?;
    Some(match target.strip_prefix(LOCAL_REF_PREFIX) {
        Some(name) => Reference::Local(name),
        None => Reference::Foreign(target),
    })
}

/// The collection name a node refers to, or `None` for anything that is not
/// a local reference.
pub fn local_ref_name(node: &Value) -> Option<&str> {
    match classify(node)? {
        Reference::Local(name) => Some(name),
        Reference::Foreign(_) => None,
    }
}

/// Build `{"$ref": "#/$defs/<name>"}`.
pub fn defs_ref(name: &str) -> Value {
    ref_node(format!("{DEFS_REF_PREFIX}{name}"))
}

/// Build `{"$ref": "#"}`.
pub fn root_anchor() -> Value {
    ref_node(ROOT_ANCHOR.to_string())
}

fn ref_node(target: String) -> Value {
    let mut obj = Map::with_capacity(1);
    obj.insert("$ref".to_string(), Value::String(target));
    Value::Object(obj)
}
