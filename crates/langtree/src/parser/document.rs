//! Decoding of translation documents from TOML and JSON.
//!
//! A document is a table whose top-level `language` and `fallback` string
//! keys declare what it provides. Every other key holds text or a nested
//! table:
//!
//! ```toml
//! language = "de"
//! fallback = "en"
//!
//! [validation]
//! email = 'Email error'
//!
//! [validation.Class]
//! email = 'Class email error'
//! ```

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use serde_json::{Map as JsonMap, Value as JsonValue};
use toml::{Table as TomlTable, Value as TomlValue};

use super::error::DecodeError;
use crate::interpreter::LoadError;
use crate::types::{Document, Entry, Values, prune};

const LANGUAGE_KEY: &str = "language";
const FALLBACK_KEY: &str = "fallback";

/// Decode a TOML document.
pub fn parse_toml_document(content: &str) -> Result<Document, DecodeError> {
    let mut table: TomlTable = toml::from_str(content)?;

    let language = toml_declaration(table.remove(LANGUAGE_KEY), LANGUAGE_KEY)?;
    let fallback = toml_declaration(table.remove(FALLBACK_KEY), FALLBACK_KEY)?;
    let mut values = toml_values(table, &mut Vec::new())?;
    prune(&mut values);

    Ok(Document::new(language, fallback, values))
}

/// Decode a JSON document. The top level must be an object.
pub fn parse_json_document(content: &str) -> Result<Document, DecodeError> {
    let mut object = match serde_json::from_str::<JsonValue>(content)? {
        JsonValue::Object(object) => object,
        other => {
            return Err(DecodeError::NotATable {
                kind: json_kind(&other),
            });
        }
    };

    let language = json_declaration(object.remove(LANGUAGE_KEY), LANGUAGE_KEY)?;
    let fallback = json_declaration(object.remove(FALLBACK_KEY), FALLBACK_KEY)?;
    let mut values = json_values(object, &mut Vec::new())?;
    prune(&mut values);

    Ok(Document::new(language, fallback, values))
}

/// Read and decode a document file, choosing the format by extension.
///
/// # Example
///
/// ```ignore
/// let doc = langtree::parser::read_document("i18n/en.toml")?;
/// ```
pub fn read_document(path: impl AsRef<Path>) -> Result<Document, LoadError> {
    let path = path.as_ref();
    let format = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);

    let decode: fn(&str) -> Result<Document, DecodeError> = match format.as_deref() {
        Some("toml") => parse_toml_document,
        Some("json") => parse_json_document,
        _ => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    decode(&content).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn toml_declaration(value: Option<TomlValue>, key: &'static str) -> Result<String, DecodeError> {
    match value {
        None => Ok(String::new()),
        Some(TomlValue::String(code)) => Ok(code),
        Some(other) => Err(DecodeError::Declaration {
            key,
            kind: other.type_str(),
        }),
    }
}

fn toml_values(table: TomlTable, path: &mut Vec<String>) -> Result<Values, DecodeError> {
    let mut values = Values::new();
    for (key, value) in table {
        path.push(key.clone());
        let entry = match value {
            TomlValue::String(text) => Entry::Text(text),
            TomlValue::Table(table) => Entry::Table(toml_values(table, path)?),
            other => {
                return Err(DecodeError::UnsupportedValue {
                    path: path.join("."),
                    kind: other.type_str(),
                });
            }
        };
        path.pop();
        values.insert(key, entry);
    }
    Ok(values)
}

fn json_declaration(value: Option<JsonValue>, key: &'static str) -> Result<String, DecodeError> {
    match value {
        None => Ok(String::new()),
        Some(JsonValue::String(code)) => Ok(code),
        Some(other) => Err(DecodeError::Declaration {
            key,
            kind: json_kind(&other),
        }),
    }
}

fn json_values(
    object: JsonMap<String, JsonValue>,
    path: &mut Vec<String>,
) -> Result<Values, DecodeError> {
    let mut values = Values::new();
    for (key, value) in object {
        path.push(key.clone());
        let entry = match value {
            JsonValue::String(text) => Entry::Text(text),
            JsonValue::Object(object) => Entry::Table(json_values(object, path)?),
            // Null is an absent value, pruned like an empty string.
            JsonValue::Null => Entry::Text(String::new()),
            other => {
                return Err(DecodeError::UnsupportedValue {
                    path: path.join("."),
                    kind: json_kind(&other),
                });
            }
        };
        path.pop();
        values.insert(key, entry);
    }
    Ok(values)
}

/// Human-readable kind of a JSON value, for error messages.
pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
