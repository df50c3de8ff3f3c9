//! Error types for building and querying translation forests.

use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;

use strsim::levenshtein;
use thiserror::Error;

use crate::parser::{DecodeError, ParseError};

/// Errors that occur while loading translation files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a translation file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file could not be decoded.
    #[error("{path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// The file extension names no known document format.
    #[error("unsupported document format for '{path}', expected .toml or .json")]
    UnsupportedFormat { path: PathBuf },

    /// The decoded documents do not form a valid forest.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Errors that abort construction of a [`LangFactory`](crate::LangFactory).
///
/// Construction is all-or-nothing: on any of these no factory is returned.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Two documents for one language declare different fallbacks.
    #[error("language '{language}' is declared with fallback '{found}', expected '{expected}'")]
    MismatchedDeclaration {
        language: String,
        expected: String,
        found: String,
    },

    /// Two documents define the same key with incompatible shapes.
    #[error("language '{language}': cannot merge key '{path}', it is already defined")]
    ConflictingLeaf { language: String, path: String },

    /// Fallback references that never reach a root language.
    #[error("invalid fallback chain: {}", format_chain(unresolved))]
    InvalidFallbackChain { unresolved: Vec<(String, String)> },

    /// A translation string failed to compile.
    #[error("template '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: TemplateError,
    },
}

fn format_chain(unresolved: &[(String, String)]) -> String {
    unresolved
        .iter()
        .map(|(code, fallback)| format!("{code} -> {fallback}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A failure to compile a translation string into a renderer.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The default dialect rejected the string.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A host-provided template factory failed.
    #[error(transparent)]
    Other(Box<dyn StdError + Send + Sync>),
}

/// A failure while rendering a translation against its context.
///
/// Carried inside a [`Translation`](crate::Translation), never raised.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A field path names something the context does not have.
    #[error("template '{template}': no value for '{field}'")]
    MissingField { template: String, field: String },

    /// A field path steps into a value that has no fields.
    #[error("template '{template}': cannot read '{field}' from {kind}")]
    NotIndexable {
        template: String,
        field: String,
        kind: &'static str,
    },

    /// A language or key argument did not evaluate to a string.
    #[error("template '{template}': expected a string argument, found {kind}")]
    NotAString {
        template: String,
        kind: &'static str,
    },

    /// A nested translation does not exist in its language's chain.
    #[error("template '{template}': translation '{key}' not found for language '{language}'")]
    NestedNotFound {
        template: String,
        language: String,
        key: String,
    },

    /// A nested translation failed to render.
    #[error("template '{template}': translation '{key}' failed")]
    Nested {
        template: String,
        key: String,
        #[source]
        source: Box<RenderError>,
    },

    /// A host-provided renderer failed.
    #[error("{message}")]
    Custom { message: String },
}

impl RenderError {
    /// Create an error for a host-provided renderer.
    pub fn custom(message: impl Into<String>) -> Self {
        RenderError::Custom {
            message: message.into(),
        }
    }
}

/// Why a [`Translation`](crate::Translation) has no text.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// The key is not defined anywhere along the fallback chain.
    #[error("translation not found: '{key}'")]
    NotFound { key: String },

    /// The renderer failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Find up to three candidates close to `key`, closest first.
///
/// Keys of three characters or fewer tolerate one edit, longer keys two.
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.chars().count() > 3 { 2 } else { 1 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (levenshtein(key, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
