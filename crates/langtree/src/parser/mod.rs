//! Template and document parsers.
//!
//! This module compiles translation strings written in the default template
//! dialect and decodes translation documents from TOML or JSON. The parser
//! produces an AST that can be used for rendering or external tooling.

pub mod ast;
pub mod error;
mod document;
mod template;

pub use ast::*;
pub use document::{parse_json_document, parse_toml_document, read_document};
pub(crate) use document::json_kind;
pub use error::{DecodeError, ParseError};
pub use template::{ACTION_OPEN, is_template, parse_template};
