//! # schemaref-core
//!
//! Resolve the `$ref` graph of OpenAPI `components.schemas` into
//! self-contained JSON Schema documents.
//!
//! Component schemas reference each other (and themselves) with
//! `#/components/schemas/<name>`. For any chosen root, [`resolve_to_definitions`]
//! produces one finite document: every schema reachable from the root becomes a
//! single `$defs` entry, references are rewritten to `#/$defs/<name>`, and a
//! self-reference of the root becomes the root anchor `#`.
//!
//! ```rust
//! use schemaref_core::{resolve_to_definitions, ResolveOptions, SchemaTable};
//! use serde_json::json;
//!
//! let schemas = json!({
//!     "Node": {
//!         "type": "object",
//!         "properties": { "next": { "$ref": "#/components/schemas/Node" } }
//!     }
//! });
//! let table = SchemaTable::from_map(schemas.as_object().unwrap());
//! let node = table.find("Node").unwrap();
//!
//! let resolution = resolve_to_definitions("Node", node, &table, &ResolveOptions::default());
//! let doc = resolution.document().unwrap();
//! assert_eq!(doc.root_ref(), "#/$defs/Node");
//! assert_eq!(doc.defs["Node"]["properties"]["next"], json!({ "$ref": "#" }));
//! ```

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod import;
pub mod prepare;
pub mod reference;
pub mod resolver;
pub mod result;
pub mod schema_utils;
pub mod table;

pub use config::{ResolveOptions, DEFAULT_DRAFT};
pub use convert::{IdentityConverter, SchemaConverter};
pub use document::DefinitionsDocument;
pub use error::{ImportError, ResolveError};
pub use import::{parse_document, DocumentKind, ImportedDocument};
pub use prepare::{prepare, prepare_text, ConvertFailure, PreparedSchema};
pub use reference::{classify, local_ref_name, Reference};
pub use resolver::{
    format_inline, inline_resolve, resolve_all, resolve_to_definitions,
    try_resolve_to_definitions, InlineText,
};
pub use result::{ErrorInfo, Resolution};
pub use schema_utils::build_path;
pub use table::{SchemaEntry, SchemaTable};
