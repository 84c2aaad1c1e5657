//! Turning user input text into a schema collection.
//!
//! Input is sniffed rather than declared: text whose first non-blank
//! character is `{` is parsed as JSON, anything else as YAML. A parsed
//! document with a top-level `openapi` key is an OpenAPI document; any other
//! object is taken to be a plain JSON Schema.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ImportError;

/// What kind of document the input turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    OpenApi,
    JsonSchema,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::OpenApi => f.write_str("OpenAPI"),
            DocumentKind::JsonSchema => f.write_str("JSON Schema"),
        }
    }
}

/// A successfully parsed input document.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDocument {
    pub kind: DocumentKind,
    pub document: Map<String, Value>,
}

impl ImportedDocument {
    /// The `components.schemas` object of an OpenAPI document.
    pub fn component_schemas(&self) -> Result<&Map<String, Value>, ImportError> {
        match self.kind {
            DocumentKind::OpenApi => component_schemas(&self.document),
            other => Err(ImportError::UnsupportedDocument(other)),
        }
    }
}

/// Returns true when the first line with content opens a JSON object.
pub fn looks_like_json(text: &str) -> bool {
    text.trim_start().starts_with('{')
}

/// Parse input text and classify it.
pub fn parse_document(text: &str) -> Result<ImportedDocument, ImportError> {
    if text.trim().is_empty() {
        return Err(ImportError::Empty);
    }

    let value: Value = if looks_like_json(text) {
        serde_json::from_str(text)?
    } else {
        parse_yaml(text)?
    };

    let document = match value {
        Value::Object(obj) => obj,
        other => {
            return Err(ImportError::NotAnObject {
                found: describe(&other).to_string(),
            })
        }
    };

    let kind = if document.contains_key("openapi") {
        DocumentKind::OpenApi
    } else {
        DocumentKind::JsonSchema
    };
    tracing::debug!(%kind, keys = document.len(), "Parsed input document");

    Ok(ImportedDocument { kind, document })
}

/// YAML with `<<` merge keys applied.
fn parse_yaml(text: &str) -> Result<Value, ImportError> {
    let mut yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
    yaml.apply_merge()?;
    Ok(serde_json::to_value(yaml)?)
}

fn component_schemas(document: &Map<String, Value>) -> Result<&Map<String, Value>, ImportError> {
    document
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_object)
        .ok_or(ImportError::MissingComponents)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
