use std::fmt::{Display, Formatter, Result as FmtResult};

use super::Message;
use crate::interpreter::{RenderError, TranslationError};

/// The outcome of sending a [`Message`] to a language source.
///
/// Absence is not an error here: a key missing from the whole fallback chain
/// yields empty text and no error. A renderer failure yields empty text and
/// the error. The original message is kept even when the text came from a
/// fallback language.
///
/// # Example
///
/// ```
/// use langtree::{Document, LangFactory, values};
///
/// let factory = LangFactory::new([Document::new(
///     "en",
///     "",
///     values! { "display" => values! { "hello" => "Hello" } },
/// )])
/// .unwrap();
///
/// let en = factory.lang("en");
/// assert_eq!(en.get("display.hello").text(), "Hello");
/// assert_eq!(en.get("display.bye").or("Bye"), "Bye");
/// assert!(en.get("display.bye").or_err().is_err());
/// ```
#[derive(Debug)]
pub struct Translation {
    message: Message,
    text: String,
    error: Option<RenderError>,
}

impl Translation {
    /// A successful lookup.
    pub fn found(message: Message, text: String) -> Self {
        Self {
            message,
            text,
            error: None,
        }
    }

    /// A lookup whose key was never defined along the chain.
    pub fn missing(message: Message) -> Self {
        Self {
            message,
            text: String::new(),
            error: None,
        }
    }

    /// A lookup whose renderer failed.
    pub fn failed(message: Message, error: RenderError) -> Self {
        Self {
            message,
            text: String::new(),
            error: Some(error),
        }
    }

    /// The message this translation answers.
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// The resolved text; empty when nothing was found or rendering failed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The render error, if the renderer failed.
    pub fn error(&self) -> Option<&RenderError> {
        self.error.as_ref()
    }

    /// Returns true if non-empty text was resolved.
    pub fn is_found(&self) -> bool {
        !self.text.is_empty()
    }

    /// The resolved text, or `default` if it is empty.
    pub fn or(&self, default: &str) -> String {
        if self.text.is_empty() {
            default.to_string()
        } else {
            self.text.clone()
        }
    }

    /// The resolved text, or why there is none.
    ///
    /// A render failure takes precedence over absence; absence reports the
    /// original dotted key.
    pub fn or_err(self) -> Result<String, TranslationError> {
        if !self.text.is_empty() {
            return Ok(self.text);
        }
        match self.error {
            Some(error) => Err(TranslationError::Render(error)),
            None => Err(TranslationError::NotFound {
                key: self.message.key(),
            }),
        }
    }
}

impl Display for Translation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.text)
    }
}
