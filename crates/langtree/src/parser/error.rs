//! Parse and decode error types.

use thiserror::Error;
use toml::de::Error as TomlError;

/// An error that occurred while compiling a template string.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A syntax error inside an action.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// `{{` without a matching `}}`.
    #[error("unclosed action at {line}:{column}")]
    UnclosedAction { line: usize, column: usize },

    /// `{{ }}` with nothing inside.
    #[error("empty action at {line}:{column}")]
    EmptyAction { line: usize, column: usize },

    /// A function name that the template dialect does not define.
    #[error("unknown function '{name}' at {line}:{column}")]
    UnknownFunction {
        name: String,
        line: usize,
        column: usize,
    },

    /// A function called with the wrong number of arguments.
    #[error("'{function}' expects {expected} arguments, got {got} at {line}:{column}")]
    ArgumentCount {
        function: String,
        expected: &'static str,
        got: usize,
        line: usize,
        column: usize,
    },
}

/// An error that occurred while decoding a translation document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The content is not valid TOML.
    #[error("invalid TOML: {0}")]
    Toml(#[from] TomlError),

    /// The content is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top level of a JSON document is not an object.
    #[error("document must be a table, found {kind}")]
    NotATable { kind: &'static str },

    /// `language` or `fallback` is declared with a non-string value.
    #[error("'{key}' must be a string, found {kind}")]
    Declaration {
        key: &'static str,
        kind: &'static str,
    },

    /// A value that is neither text nor a table.
    #[error("unsupported {kind} value at '{path}'")]
    UnsupportedValue { path: String, kind: &'static str },
}
