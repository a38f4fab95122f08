//! Source document formats.
//!
//! Training configs arrive as JSON (kohya_ss GUI exports) or TOML
//! (sd-scripts `--config_file`). Both are parsed into a JSON object.

use serde_json::{Map, Value};
use std::path::Path;

use crate::error::RewriteError;

/// Serialization format of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
}

impl SourceFormat {
    /// Pick the format from the file extension. Anything that is not
    /// `.toml` is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SourceFormat::Toml,
            _ => SourceFormat::Json,
        }
    }

    /// Parse `contents` into a top-level object.
    pub fn parse(self, path: &Path, contents: &str) -> Result<Map<String, Value>, RewriteError> {
        let value = match self {
            SourceFormat::Json => serde_json::from_str::<Value>(contents)
                .map_err(|e| RewriteError::parse(path, format!("JSON parse error: {}", e)))?,
            SourceFormat::Toml => {
                let table: toml::Value = toml::from_str(contents)
                    .map_err(|e| RewriteError::parse(path, format!("TOML parse error: {}", e)))?;
                toml_to_json(table)
            }
        };

        match value {
            Value::Object(map) => Ok(map),
            other => Err(RewriteError::parse(
                path,
                format!("expected a top-level object, found {}", type_name(&other)),
            )),
        }
    }
}

/// Convert a TOML value to the equivalent JSON value.
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
