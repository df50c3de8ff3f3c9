//! Miette diagnostics for translation documents that fail to load.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::fs::read_to_string;
use std::path::Path;

use langtree::{BuildError, DecodeError, LoadError};
use miette::{Diagnostic, NamedSource, Report, SourceSpan, miette};
use thiserror::Error;

/// A decode error pointed at its location in the document.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(langtree::decode))]
pub struct DecodeDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: Option<SourceSpan>,

    message: String,

    #[help]
    help: Option<String>,
}

impl DecodeDiagnostic {
    /// Create a diagnostic from a DecodeError with source context.
    pub fn from_decode_error(path: &Path, content: &str, err: &DecodeError) -> Self {
        let (span, help) = match err {
            DecodeError::Toml(toml) => (toml.span().map(SourceSpan::from), None),
            DecodeError::Json(json) => {
                let offset = line_column_offset(content, json.line(), json.column());
                (Some((offset, 1).into()), None)
            }
            DecodeError::NotATable { .. } => (
                Some((0, 1).into()),
                Some("a document is an object of keys, e.g. { \"language\": \"en\" }".to_string()),
            ),
            DecodeError::Declaration { key, .. } => (
                find_key(content, key),
                Some(format!("declare the code as a string, e.g. {key} = \"en\"")),
            ),
            DecodeError::UnsupportedValue { path, .. } => (
                path.rsplit('.').next().and_then(|key| find_key(content, key)),
                Some("translation values must be strings or tables".to_string()),
            ),
        };

        DecodeDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            message: err.to_string(),
            help,
        }
    }
}

/// Turn a load failure into a report, re-reading the file for decode errors.
pub fn load_report(err: LoadError) -> Report {
    match err {
        LoadError::Decode { path, source } => match read_to_string(&path) {
            Ok(content) => DecodeDiagnostic::from_decode_error(&path, &content, &source).into(),
            Err(_) => miette!("{}: {source}", path.display()),
        },
        LoadError::Build(err) => match build_help(&err) {
            Some(help) => miette!(help = help, "{err}"),
            None => miette!("{err}"),
        },
        other => miette!("{other}"),
    }
}

fn build_help(err: &BuildError) -> Option<&'static str> {
    match err {
        BuildError::InvalidFallbackChain { .. } => {
            Some("every fallback must name a declared language, and chains must not loop")
        }
        BuildError::ConflictingLeaf { .. } => {
            Some("a key may hold text in only one document per language")
        }
        BuildError::MismatchedDeclaration { .. } => {
            Some("all documents for one language must declare the same fallback")
        }
        BuildError::Template { .. } => None,
    }
}

/// Convert a 1-based line and column to a byte offset.
fn line_column_offset(content: &str, line: usize, column: usize) -> usize {
    let offset = content
        .lines()
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum::<usize>()
        + column.saturating_sub(1);

    // Clamp offset to content length to avoid miette panic on out-of-bounds
    offset.min(content.len())
}

/// The span of the first occurrence of `key`, quoted or bare.
fn find_key(content: &str, key: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{key}\"");
    content
        .find(&quoted)
        .map(|offset| (offset, quoted.len()).into())
        .or_else(|| content.find(key).map(|offset| (offset, key.len()).into()))
}
