//! Render-time capabilities: renderers and the translator they may call.

use serde_json::Value as JsonValue;

use crate::interpreter::RenderError;
use crate::types::{Message, Translation};

/// Global lookup by language code, handed to every renderer.
///
/// This is how one translation interpolates another. Nothing guards against
/// a template that reaches itself through this capability: such a template
/// recurses until the stack is exhausted.
pub trait Translator {
    /// Resolve `message` against the source for `language`.
    fn translate(&self, language: &str, message: &Message) -> Translation;
}

/// A compiled translation string.
///
/// Renderers are built once per leaf when the forest is constructed and are
/// then shared across threads; rendering must not mutate them.
pub trait Renderer: Send + Sync {
    /// Render against `context`, re-entering lookup through `translator`.
    fn render(
        &self,
        context: &JsonValue,
        translator: &dyn Translator,
    ) -> Result<String, RenderError>;
}

impl<F> Renderer for F
where
    F: Fn(&JsonValue, &dyn Translator) -> Result<String, RenderError> + Send + Sync,
{
    fn render(
        &self,
        context: &JsonValue,
        translator: &dyn Translator,
    ) -> Result<String, RenderError> {
        self(context, translator)
    }
}

/// A renderer for text without actions; it ignores its context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant(pub String);

impl Renderer for Constant {
    fn render(&self, _: &JsonValue, _: &dyn Translator) -> Result<String, RenderError> {
        Ok(self.0.clone())
    }
}

/// Box a constant renderer.
pub fn constant(text: impl Into<String>) -> Box<dyn Renderer> {
    Box::new(Constant(text.into()))
}

/// State carried through the evaluation of one compiled template.
pub struct RenderScope<'a> {
    /// Diagnostic name of the template, `[language]dotted.path`.
    pub name: &'a str,
    /// Language the template belongs to; the default for nested lookups.
    pub language: &'a str,
    /// The context value of the current message.
    pub context: &'a JsonValue,
    /// Lookup capability for nested translations.
    pub translator: &'a dyn Translator,
}
