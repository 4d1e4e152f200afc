//! Knowledge source loading
//!
//! Accepts either a bare JSON array of entries or an object carrying the
//! array under `knowledge`. Any other shape, a missing file, or a parse
//! failure degrades to an empty knowledge base with a logged warning.

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::{Result, ServiceError};
use crate::knowledge::entry::{KnowledgeBase, KnowledgeEntry};

/// Field name used by the object-shaped source format
pub const KNOWLEDGE_FIELD: &str = "knowledge";

impl KnowledgeBase {
    /// Load from a JSON file, never failing.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(base) => {
                info!(path = %path.display(), entries = base.len(), "Loaded knowledge entries");
                base
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Error loading knowledge base");
                Self::empty()
            }
        }
    }

    /// Load from a JSON file, reporting why the source was unusable.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let value: Value = serde_json::from_str(&contents)?;
        Self::try_from_json_value(value)
    }

    /// Interpret an already-parsed JSON document, never failing.
    pub fn from_json_value(value: Value) -> Self {
        Self::try_from_json_value(value).unwrap_or_else(|e| {
            warn!(error = %e, "Invalid knowledge base format");
            Self::empty()
        })
    }

    /// Interpret an already-parsed JSON document.
    pub fn try_from_json_value(value: Value) -> Result<Self> {
        let entries = match value {
            Value::Array(items) => Value::Array(items),
            Value::Object(mut map) => map.remove(KNOWLEDGE_FIELD).ok_or_else(|| {
                ServiceError::KnowledgeLoad(format!(
                    "object source has no `{}` field",
                    KNOWLEDGE_FIELD
                ))
            })?,
            other => {
                return Err(ServiceError::KnowledgeLoad(format!(
                    "expected an array or object, found {}",
                    json_kind(&other)
                )))
            }
        };

        let entries: Vec<KnowledgeEntry> = serde_json::from_value(entries)
            .map_err(|e| ServiceError::KnowledgeLoad(format!("malformed entries: {}", e)))?;

        Ok(Self::new(entries))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
