//! Language sources: the runtime view of one language in a factory.

use serde_json::Value as JsonValue;
use tracing::trace;

use crate::interpreter::binder::{KeyConfig, find_config};
use crate::interpreter::context::Renderer;
use crate::interpreter::factory::{LangFactory, SourceNode};
use crate::types::{Message, Translation};

/// Answers lookups for one language, delegating misses to its fallback.
///
/// A source is a cheap handle into its [`LangFactory`]. Sources for unknown
/// language codes are empty: every lookup misses.
///
/// # Example
///
/// ```
/// use langtree::{Document, LangFactory, values};
///
/// let factory = LangFactory::new([
///     Document::new("en", "", values! { "display" => values! {
///         "hello" => "Hello",
///         "bye" => "Bye",
///     } }),
///     Document::new("es", "en", values! { "display" => values! { "hello" => "Hola" } }),
/// ])
/// .unwrap();
///
/// let es = factory.lang("ES");
/// assert_eq!(es.get("display.hello").text(), "Hola");
/// assert_eq!(es.get("display.bye").text(), "Bye");
/// assert_eq!(factory.lang_no_fallback("es").get("display.bye").text(), "");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LangSource<'f> {
    factory: &'f LangFactory,
    node: Option<usize>,
    no_fallback: bool,
}

impl<'f> LangSource<'f> {
    pub(crate) fn new(factory: &'f LangFactory, node: Option<usize>, no_fallback: bool) -> Self {
        Self {
            factory,
            node,
            no_fallback,
        }
    }

    /// The language code, or `None` for an empty source.
    pub fn language(&self) -> Option<&'f str> {
        self.node_data().map(|node| node.language.as_str())
    }

    /// Returns true if this source knows no language.
    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// The source this one delegates to, unless delegation is disabled.
    pub fn fallback(&self) -> Option<LangSource<'f>> {
        if self.no_fallback {
            return None;
        }
        let fallback = self.node_data()?.fallback?;
        Some(LangSource::new(self.factory, Some(fallback), false))
    }

    /// Look up a dotted key without context.
    pub fn get(&self, key: &str) -> Translation {
        self.msg(Message::new(key))
    }

    /// Look up a dotted key, rendering with `context`.
    pub fn get_with(&self, key: &str, context: impl Into<JsonValue>) -> Translation {
        self.msg(Message::new(key).with_context(context))
    }

    /// Try keys in order, returning the first with non-empty text.
    ///
    /// Each key runs through the whole fallback chain before the next one is
    /// tried. If none resolves, the result is keyed on the first candidate.
    pub fn get_first<K: AsRef<str>>(&self, keys: &[K]) -> Translation {
        self.get_first_with(keys, JsonValue::Null)
    }

    /// [`get_first`](Self::get_first) with a context for the renderer.
    pub fn get_first_with<K: AsRef<str>>(
        &self,
        keys: &[K],
        context: impl Into<JsonValue>,
    ) -> Translation {
        let context = context.into();
        for key in keys {
            let translation = self.msg(Message::new(key.as_ref()).with_context(context.clone()));
            if translation.is_found() {
                return translation;
            }
        }
        let first = keys.first().map_or("", <K as AsRef<str>>::as_ref);
        Translation::missing(Message::new(first).with_context(context))
    }

    /// Returns true if `key` resolves to a leaf here or along the chain.
    ///
    /// Nothing is rendered.
    pub fn contains(&self, key: &str) -> bool {
        self.resolve(&Message::new(key)).is_some()
    }

    /// Resolve a prepared message.
    pub fn msg(&self, message: Message) -> Translation {
        let Some(renderer) = self.resolve(&message) else {
            return Translation::missing(message);
        };
        match renderer.render(message.context(), self.factory) {
            Ok(text) => Translation::found(message, text),
            Err(error) => Translation::failed(message, error),
        }
    }

    /// Resolve a borrowed message, copying it into the translation.
    pub fn msg_ref(&self, message: &Message) -> Translation {
        self.msg(message.clone())
    }

    /// Find the renderer for the message's key along the chain.
    fn resolve(&self, message: &Message) -> Option<&'f dyn Renderer> {
        if message.is_empty_key() {
            return None;
        }
        let mut current = self.node;
        while let Some(index) = current {
            let node = &self.factory.nodes[index];
            let renderer = find_config(&node.configs, message.key_path())
                .and_then(KeyConfig::renderer);
            if renderer.is_some() {
                return renderer;
            }
            if self.no_fallback || message.is_no_fallback() {
                return None;
            }
            current = node.fallback;
            if let Some(next) = current {
                trace!(
                    key = %message,
                    from = %node.language,
                    to = %self.factory.nodes[next].language,
                    "delegating to fallback"
                );
            }
        }
        None
    }

    fn node_data(&self) -> Option<&'f SourceNode> {
        self.node.map(|index| &self.factory.nodes[index])
    }
}
