//! Batch preparation of an imported OpenAPI document.
//!
//! Every `components.schemas` entry is converted, placed in one shared
//! [`SchemaTable`], and resolved in both inline and definitions mode. Each
//! entry is independent: a conversion or resolution failure is recorded on
//! that entry only.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ResolveOptions;
use crate::convert::SchemaConverter;
use crate::error::ImportError;
use crate::import::{parse_document, ImportedDocument};
use crate::resolver::{format_inline, resolve_to_definitions, InlineText};
use crate::result::{ErrorInfo, Resolution};
use crate::table::{display_order, SchemaEntry, SchemaTable};

/// The converter rejected one entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to convert schema {name}: {message}")]
pub struct ConvertFailure {
    pub name: String,
    pub message: String,
}

impl From<&ConvertFailure> for ErrorInfo {
    fn from(failure: &ConvertFailure) -> Self {
        ErrorInfo::new("conversion", failure.to_string())
    }
}

/// One prepared component schema.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedSchema {
    pub name: String,
    /// The schema as written in the OpenAPI document.
    pub openapi_schema: Value,
    /// Converter output; `None` when conversion failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<Value>,
    /// Single-level inline expansion; `None` when conversion failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inlined: Option<InlineText>,
    /// Definitions-mode resolution, or the conversion failure.
    pub resolved: Resolution,
}

/// Prepare every component schema of `document`, in display order.
pub fn prepare(
    document: &ImportedDocument,
    converter: &impl SchemaConverter,
    options: &ResolveOptions,
) -> Result<Vec<PreparedSchema>, ImportError> {
    let schemas = document.component_schemas()?;

    let mut sources: Vec<(&String, &Value)> = schemas.iter().collect();
    sources.sort_by(|(a, _), (b, _)| display_order(a, b));

    let converted: Vec<(String, Value, Result<Value, ConvertFailure>)> = sources
        .into_iter()
        .map(|(name, openapi)| {
            let json_schema = converter.to_json_schema(openapi).map_err(|message| {
                tracing::warn!(name = name.as_str(), %message, "Schema conversion failed");
                ConvertFailure {
                    name: name.clone(),
                    message,
                }
            });
            (name.clone(), openapi.clone(), json_schema)
        })
        .collect();

    let table = SchemaTable::from_entries(converted.iter().filter_map(|(name, _, schema)| {
        schema
            .as_ref()
            .ok()
            .map(|s| SchemaEntry::new(name.clone(), s.clone()))
    }));
    tracing::debug!(
        total = converted.len(),
        converted = table.len(),
        "Prepared schema table"
    );

    let prepared = converted
        .into_iter()
        .map(|(name, openapi_schema, json_schema)| match json_schema {
            Ok(schema) => PreparedSchema {
                inlined: Some(format_inline(&schema, &table)),
                resolved: resolve_to_definitions(&name, &schema, &table, options),
                json_schema: Some(schema),
                name,
                openapi_schema,
            },
            Err(failure) => PreparedSchema {
                resolved: Resolution::Failed(ErrorInfo::from(&failure)),
                inlined: None,
                json_schema: None,
                name,
                openapi_schema,
            },
        })
        .collect();

    Ok(prepared)
}

/// [`parse_document`] followed by [`prepare`].
pub fn prepare_text(
    text: &str,
    converter: &impl SchemaConverter,
    options: &ResolveOptions,
) -> Result<Vec<PreparedSchema>, ImportError> {
    let document = parse_document(text)?;
    prepare(&document, converter, options)
}
