//! Training configuration documents.
//!
//! A [`ConfigDocument`] is the top-level object of a training config. It is
//! loaded once, mutated in memory and written to a new location; the source
//! file is never written back. Key order of the source is preserved.

mod format;

pub use format::SourceFormat;

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RewriteError;
use format::type_name;

/// A loaded training configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    source: PathBuf,
    fields: Map<String, Value>,
}

impl ConfigDocument {
    /// Load a document from disk. `.toml` files are parsed as TOML,
    /// everything else as JSON.
    pub fn load(path: &Path) -> Result<Self, RewriteError> {
        let contents = fs::read_to_string(path).map_err(|e| RewriteError::io(path, e))?;
        let fields = SourceFormat::from_path(path).parse(path, &contents)?;

        tracing::debug!(path = %path.display(), keys = fields.len(), "loaded config");

        Ok(Self {
            source: path.to_path_buf(),
            fields,
        })
    }

    /// Build a document from an in-memory object.
    pub fn from_fields(source: impl Into<PathBuf>, fields: Map<String, Value>) -> Self {
        Self {
            source: source.into(),
            fields,
        }
    }

    /// Path the document was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Get a required value.
    pub fn require(&self, key: &str) -> Result<&Value, RewriteError> {
        self.fields.get(key).ok_or_else(|| RewriteError::missing(key))
    }

    /// Get a required string value.
    pub fn require_str(&self, key: &str) -> Result<&str, RewriteError> {
        self.require(key)?
            .as_str()
            .ok_or_else(|| RewriteError::invalid(key, "string"))
    }

    /// Get a required numeric value.
    pub fn require_f64(&self, key: &str) -> Result<f64, RewriteError> {
        self.require(key)?
            .as_f64()
            .ok_or_else(|| RewriteError::invalid(key, "number"))
    }

    /// Render a required number or string as text, the way it appears in
    /// derived names (`8`, `0.5`, `"16"` -> `16`).
    pub fn require_text(&self, key: &str) -> Result<String, RewriteError> {
        match self.require(key)? {
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) => Ok(s.clone()),
            other => Err(RewriteError::invalid(
                key,
                &format!("number or string, found {}", type_name(other)),
            )),
        }
    }

    /// Set a value. Existing keys keep their position; new keys are appended.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Serialize as pretty-printed JSON (two-space indent).
    pub fn to_pretty_json(&self) -> Result<String, RewriteError> {
        serde_json::to_string_pretty(&self.fields)
            .map_err(|e| RewriteError::parse(&self.source, format!("JSON serialization failed: {}", e)))
    }
}
