//! Boundary to the OpenAPI → JSON Schema converter.
//!
//! Structural conversion of OpenAPI schema objects is not done here; callers
//! plug their converter in through [`SchemaConverter`]. A converter may fail
//! on one entry without affecting the rest of a batch.

use serde_json::Value;

/// Pure conversion of one OpenAPI schema object into a JSON Schema tree.
pub trait SchemaConverter {
    /// Convert `schema`. The error string is surfaced as the entry's
    /// failure message.
    fn to_json_schema(&self, schema: &Value) -> Result<Value, String>;
}

/// Converter that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

impl SchemaConverter for IdentityConverter {
    fn to_json_schema(&self, schema: &Value) -> Result<Value, String> {
        Ok(schema.clone())
    }
}

impl<F> SchemaConverter for F
where
    F: Fn(&Value) -> Result<Value, String>,
{
    fn to_json_schema(&self, schema: &Value) -> Result<Value, String> {
        self(schema)
    }
}
