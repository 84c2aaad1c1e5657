//! Tagged outcome of resolving one root schema.
//!
//! Resolution never fails past its boundary: every error is captured here so
//! one broken schema cannot take down the rest of a batch.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::document::DefinitionsDocument;
use crate::error::ResolveError;

/// Structured description of a failed resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable tag (e.g. `depth_exceeded`, `conversion`).
    pub kind: String,
    /// Human-readable description of the cause.
    pub message: String,
}

impl ErrorInfo {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl From<&ResolveError> for ErrorInfo {
    fn from(err: &ResolveError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// `{ok: true, document} | {ok: false, error}`
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(DefinitionsDocument),
    Failed(ErrorInfo),
}

impl Resolution {
    pub fn is_ok(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn document(&self) -> Option<&DefinitionsDocument> {
        match self {
            Resolution::Resolved(doc) => Some(doc),
            Resolution::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Resolution::Resolved(_) => None,
            Resolution::Failed(info) => Some(info),
        }
    }

    /// Convert into a plain `Result`.
    pub fn into_result(self) -> Result<DefinitionsDocument, ErrorInfo> {
        match self {
            Resolution::Resolved(doc) => Ok(doc),
            Resolution::Failed(info) => Err(info),
        }
    }

    /// Text shown in place of the expanded document: pretty JSON on success,
    /// `Error: <message>` otherwise.
    pub fn display_text(&self) -> String {
        let rendered = match self {
            Resolution::Resolved(doc) => doc.to_json_pretty().map_err(|e| e.to_string()),
            Resolution::Failed(info) => Err(info.message.clone()),
        };
        rendered.unwrap_or_else(|message| format!("Error: {message}"))
    }
}

impl From<Result<DefinitionsDocument, ResolveError>> for Resolution {
    fn from(result: Result<DefinitionsDocument, ResolveError>) -> Self {
        match result {
            Ok(doc) => Resolution::Resolved(doc),
            Err(err) => Resolution::Failed(ErrorInfo::from(&err)),
        }
    }
}

impl Serialize for Resolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            Resolution::Resolved(doc) => {
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("document", doc)?;
            }
            Resolution::Failed(info) => {
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("error", info)?;
            }
        }
        map.end()
    }
}
