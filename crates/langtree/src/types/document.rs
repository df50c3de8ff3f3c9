use bon::Builder;

use super::Values;

/// One decoded translation unit, typically a single file.
///
/// A document declares the language it provides text for and, optionally,
/// the language to consult when a key is missing. Language codes are
/// compared case-insensitively; an empty `fallback` marks a root language.
///
/// # Example
///
/// ```
/// use langtree::{Document, values};
///
/// let doc = Document::builder()
///     .language("es")
///     .fallback("en")
///     .values(values! { "display" => values! { "hello" => "Hola" } })
///     .build();
///
/// assert_eq!(doc.language, "es");
/// assert!(doc.has_fallback());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct Document {
    /// Language code this document provides (e.g., "en", "de").
    #[builder(default)]
    pub language: String,

    /// Language code to defer to on a miss; empty for none.
    #[builder(default)]
    pub fallback: String,

    /// The translation tree.
    #[builder(default)]
    pub values: Values,
}

impl Document {
    /// Create a document from its parts.
    pub fn new(
        language: impl Into<String>,
        fallback: impl Into<String>,
        values: Values,
    ) -> Self {
        Self {
            language: language.into(),
            fallback: fallback.into(),
            values,
        }
    }

    /// Returns true if the document names a fallback language.
    pub fn has_fallback(&self) -> bool {
        !self.fallback.is_empty()
    }
}
