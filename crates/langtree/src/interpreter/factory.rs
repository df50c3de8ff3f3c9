//! The translation forest and its entry point.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::interpreter::binder::{ConfigMap, DefaultTemplateFactory, TemplateFactory, bind_values};
use crate::interpreter::context::Translator;
use crate::interpreter::error::compute_suggestions;
use crate::interpreter::fallback::resolve_fallbacks;
use crate::interpreter::merge::merge_documents;
use crate::interpreter::source::LangSource;
use crate::interpreter::BuildError;
use crate::types::{Document, Message, Translation};

/// One language in the arena.
#[derive(Debug)]
pub(crate) struct SourceNode {
    pub language: String,
    /// Always an earlier index than this node's own.
    pub fallback: Option<usize>,
    pub configs: ConfigMap,
}

/// An immutable forest of languages, each with a compiled key tree.
///
/// Built all at once from decoded documents; construction either yields the
/// complete forest or an error. Afterwards the factory is read-only and may
/// be shared freely between threads.
///
/// # Example
///
/// ```
/// use langtree::{Document, LangFactory, values};
/// use serde_json::json;
///
/// let factory = LangFactory::new([Document::new(
///     "en",
///     "",
///     values! { "display" => values! { "hello_name" => "Hello, {{.Name}}" } },
/// )])
/// .unwrap();
///
/// let text = factory
///     .lang("en")
///     .get_with("display.hello_name", json!({ "Name": "Wut" }));
/// assert_eq!(text.text(), "Hello, Wut");
/// ```
#[derive(Debug, Default)]
pub struct LangFactory {
    pub(crate) nodes: Vec<SourceNode>,
    index: BTreeMap<String, usize>,
}

impl LangFactory {
    /// Build a forest using the default template dialect.
    pub fn new(documents: impl IntoIterator<Item = Document>) -> Result<Self, BuildError> {
        Self::with_template_factory(&DefaultTemplateFactory, documents)
    }

    /// Build a forest, compiling every leaf with `templates`.
    ///
    /// Documents for the same language are merged in the order given. The
    /// fallback graph must be acyclic and every fallback must name a
    /// declared language.
    pub fn with_template_factory(
        templates: &dyn TemplateFactory,
        documents: impl IntoIterator<Item = Document>,
    ) -> Result<Self, BuildError> {
        let mut merged = merge_documents(documents)?;
        let fallbacks: BTreeMap<String, String> = merged
            .values()
            .map(|input| (input.language.clone(), input.fallback.clone()))
            .collect();
        let forest = resolve_fallbacks(&fallbacks)?;

        let mut nodes = Vec::with_capacity(forest.nodes.len());
        let mut index = BTreeMap::new();
        for node in forest.nodes {
            let values = merged
                .remove(&node.language)
                .map(|input| input.values)
                .unwrap_or_default();
            let configs = bind_values(&node.language, values, templates)?;
            index.insert(node.language.clone(), nodes.len());
            nodes.push(SourceNode {
                language: node.language,
                fallback: node.fallback,
                configs,
            });
        }

        debug!(
            languages = nodes.len(),
            roots = nodes.iter().filter(|node| node.fallback.is_none()).count(),
            "built translation forest"
        );
        Ok(Self { nodes, index })
    }

    /// A factory without languages; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The source for `code`, compared case-insensitively.
    ///
    /// Unknown codes yield an empty source rather than an error.
    pub fn lang(&self, code: &str) -> LangSource<'_> {
        LangSource::new(self, self.node_index(code), false)
    }

    /// Like [`lang`](Self::lang), but lookups never leave this language.
    pub fn lang_no_fallback(&self, code: &str) -> LangSource<'_> {
        LangSource::new(self, self.node_index(code), true)
    }

    /// Returns true if `code` names a language in the forest.
    pub fn has_language(&self, code: &str) -> bool {
        self.node_index(code).is_some()
    }

    /// Known language codes, sorted.
    pub fn languages(&self) -> Vec<&str> {
        self.index.keys().map(String::as_str).collect()
    }

    /// The fallback code declared by `code`, if any.
    pub fn fallback_of(&self, code: &str) -> Option<&str> {
        let node = &self.nodes[self.node_index(code)?];
        node.fallback
            .map(|fallback| self.nodes[fallback].language.as_str())
    }

    /// Dotted leaf keys `code` defines itself, sorted.
    pub fn keys(&self, code: &str) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(index) = self.node_index(code) {
            collect_keys(&self.nodes[index].configs, &mut Vec::new(), &mut keys);
        }
        keys
    }

    /// Keys close to `key` that are reachable from `code`'s chain.
    pub fn suggest(&self, code: &str, key: &str) -> Vec<String> {
        let mut reachable = BTreeSet::new();
        let mut current = self.node_index(code);
        while let Some(index) = current {
            let node = &self.nodes[index];
            collect_keys(&node.configs, &mut Vec::new(), &mut reachable);
            current = node.fallback;
        }
        let available: Vec<String> = reachable.into_iter().collect();
        compute_suggestions(key, &available)
    }

    fn node_index(&self, code: &str) -> Option<usize> {
        self.index.get(&code.to_lowercase()).copied()
    }
}

impl Translator for LangFactory {
    fn translate(&self, language: &str, message: &Message) -> Translation {
        self.lang(language).msg_ref(message)
    }
}

fn collect_keys<C: Extend<String>>(configs: &ConfigMap, path: &mut Vec<String>, out: &mut C) {
    for (key, config) in configs {
        path.push(key.clone());
        match config.children() {
            Some(children) => collect_keys(children, path, out),
            None => out.extend([path.join(".")]),
        }
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;

    fn factory() -> LangFactory {
        LangFactory::new([
            Document::new("en", "", values! { "display" => values! {
                "hello" => "Hello",
                "bye" => "Bye",
            } }),
            Document::new("es", "en", values! { "display" => values! { "hello" => "Hola" } }),
        ])
        .unwrap()
    }

    #[test]
    fn arena_places_fallbacks_first() {
        let factory = factory();
        let es = factory.node_index("es").unwrap();
        let en = factory.node_index("en").unwrap();
        assert!(en < es);
        assert_eq!(factory.nodes[es].fallback, Some(en));
    }

    #[test]
    fn keys_list_own_leaves_only() {
        let factory = factory();
        assert_eq!(factory.keys("en"), ["display.bye", "display.hello"]);
        assert_eq!(factory.keys("es"), ["display.hello"]);
        assert!(factory.keys("fr").is_empty());
    }

    #[test]
    fn suggestions_span_the_chain() {
        assert_eq!(factory().suggest("es", "display.by"), ["display.bye"]);
    }

    #[test]
    fn fallback_of_reports_declared_code() {
        let factory = factory();
        assert_eq!(factory.fallback_of("ES"), Some("en"));
        assert_eq!(factory.fallback_of("en"), None);
        assert_eq!(factory.fallback_of("fr"), None);
    }
}
