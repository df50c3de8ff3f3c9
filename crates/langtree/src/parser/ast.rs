//! Public AST types for compiled translation templates.
//!
//! These types are public to enable external tooling (linters, formatters, etc.).

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A parsed template string containing segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text, copied to the output as-is.
    Literal(String),
    /// An action evaluated against the render context: `{{ ... }}`.
    Action(Action),
}

/// An action inside `{{ }}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Render a value from the context: `{{ .Name }}`, `{{ . }}`.
    Field(FieldPath),
    /// Render another translation.
    ///
    /// `{{ t "key" }}` and `{{ t "key" .Arg }}` use the current language;
    /// `{{ lang "en" "key" }}` names one explicitly. Without a context
    /// argument, the nested lookup receives the current context.
    Translate {
        language: Option<Argument>,
        key: Argument,
        context: Option<Argument>,
    },
}

/// An argument to a function action.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A string literal: `"text"` or `` `raw` ``.
    Str(String),
    /// A context lookup: `.Name`.
    Field(FieldPath),
}

/// A dotted path into the context. No segments means the context itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    pub segments: Vec<String>,
}

impl FieldPath {
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The path referring to the whole context, `.`.
    pub fn dot() -> Self {
        Self::default()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.segments.is_empty() {
            return write!(f, ".");
        }
        for segment in &self.segments {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}
