//! WASM bindings for schemaref.
//!
//! Exposes `prepare`, `resolve` and `inline` via `wasm-bindgen` for use from
//! the browser. Uses `serde-wasm-bindgen` for JS ↔ serde_json::Value
//! marshalling; results are emitted as plain JS objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

use schemaref_core::{
    inline_resolve, prepare_text, resolve_to_definitions, IdentityConverter, ResolveOptions,
    SchemaTable,
};

/// Initialize WASM module: sets up panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Resolve options as JS callers spell them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WasmResolveOptions {
    max_depth: Option<usize>,
    max_nodes: Option<usize>,
    draft: Option<String>,
}

impl From<WasmResolveOptions> for ResolveOptions {
    fn from(opts: WasmResolveOptions) -> Self {
        let defaults = ResolveOptions::default();
        ResolveOptions {
            max_depth: opts.max_depth.or(defaults.max_depth),
            max_nodes: opts.max_nodes,
            draft: opts.draft.unwrap_or(defaults.draft),
        }
    }
}

/// `undefined` / `null` → defaults.
fn parse_options(options: JsValue) -> Result<ResolveOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(ResolveOptions::default());
    }
    let opts: WasmResolveOptions = serde_wasm_bindgen::from_value(options)?;
    Ok(opts.into())
}

fn parse_table(schemas: JsValue) -> Result<SchemaTable, JsError> {
    let schemas: Map<String, Value> = serde_wasm_bindgen::from_value(schemas)?;
    Ok(SchemaTable::from_map(&schemas))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

/// Import an OpenAPI document (JSON or YAML text) and prepare every
/// component schema.
///
/// Returns an array of `{ name, openapiSchema, jsonSchema, inlined, resolved }`.
#[wasm_bindgen]
pub fn prepare(text: &str, options: JsValue) -> Result<JsValue, JsError> {
    let options = parse_options(options)?;
    let prepared = prepare_text(text, &IdentityConverter, &options)
        .map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&prepared)
}

/// Resolve `root` from a `{ name: schema }` object into a definitions
/// document. Returns `{ ok: true, document }` or `{ ok: false, error }`.
#[wasm_bindgen]
pub fn resolve(schemas: JsValue, root: &str, options: JsValue) -> Result<JsValue, JsError> {
    let options = parse_options(options)?;
    let table = parse_table(schemas)?;
    let schema = table
        .find(root)
        .ok_or_else(|| JsError::new(&format!("Unknown schema: {root}")))?;
    to_js(&resolve_to_definitions(root, schema, &table, &options))
}

/// Single-level inline substitution of `root`'s references. An absent
/// result is `null`.
#[wasm_bindgen]
pub fn inline(schemas: JsValue, root: &str) -> Result<JsValue, JsError> {
    let table = parse_table(schemas)?;
    let schema = table
        .find(root)
        .ok_or_else(|| JsError::new(&format!("Unknown schema: {root}")))?;
    to_js(&inline_resolve(schema, &table).unwrap_or(Value::Null))
}
