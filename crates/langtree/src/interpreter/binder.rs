//! Template binding: turning merged translation trees into renderer trees.
//!
//! Every leaf string is compiled exactly once, while the forest is built.
//! Lookups only ever call the resulting renderers.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::interpreter::context::{Constant, Renderer};
use crate::interpreter::evaluator::CompiledTemplate;
use crate::interpreter::{BuildError, TemplateError};
use crate::parser::{is_template, parse_template};
use crate::types::{Entry, Values};

/// Compiles translation strings into renderers.
///
/// Hosts may substitute their own dialect by implementing this trait and
/// passing it to [`LangFactory::with_template_factory`](crate::LangFactory::with_template_factory).
pub trait TemplateFactory {
    /// Compile the string found at `path` in `language`'s tree.
    fn template(
        &self,
        language: &str,
        path: &[String],
        entry: &str,
    ) -> Result<Box<dyn Renderer>, TemplateError>;
}

/// The built-in template dialect.
///
/// Strings without `{{` become constants. Anything else is parsed with
/// [`parse_template`] under the name `[language]dotted.path`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTemplateFactory;

impl TemplateFactory for DefaultTemplateFactory {
    fn template(
        &self,
        language: &str,
        path: &[String],
        entry: &str,
    ) -> Result<Box<dyn Renderer>, TemplateError> {
        if !is_template(entry) {
            return Ok(Box::new(Constant(entry.to_string())));
        }
        let template = parse_template(entry)?;
        Ok(Box::new(CompiledTemplate::new(
            template_name(language, path),
            language.to_string(),
            template,
        )))
    }
}

/// The diagnostic name of the template at `path`: `[language]a.b.c`.
pub fn template_name(language: &str, path: &[String]) -> String {
    format!("[{language}]{}", path.join("."))
}

/// Child nodes of a bound tree, by key.
pub type ConfigMap = BTreeMap<String, KeyConfig>;

/// One node of a bound tree: it either renders or routes to children.
pub enum KeyConfig {
    Leaf(Box<dyn Renderer>),
    Table(ConfigMap),
}

impl KeyConfig {
    /// The renderer, if this node is a leaf.
    pub fn renderer(&self) -> Option<&dyn Renderer> {
        match self {
            KeyConfig::Leaf(renderer) => Some(renderer.as_ref()),
            KeyConfig::Table(_) => None,
        }
    }

    /// The children, if this node is a table.
    pub fn children(&self) -> Option<&ConfigMap> {
        match self {
            KeyConfig::Leaf(_) => None,
            KeyConfig::Table(children) => Some(children),
        }
    }
}

impl Debug for KeyConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            KeyConfig::Leaf(_) => f.write_str("Leaf(..)"),
            KeyConfig::Table(children) => f.debug_map().entries(children.iter()).finish(),
        }
    }
}

/// Follow `keys` through a bound tree. The last key may name either kind.
pub fn find_config<'c>(configs: &'c ConfigMap, keys: &[String]) -> Option<&'c KeyConfig> {
    let (first, rest) = keys.split_first()?;
    let config = configs.get(first)?;
    if rest.is_empty() {
        return Some(config);
    }
    find_config(config.children()?, rest)
}

/// Compile every leaf of `values` for `language`.
pub fn bind_values(
    language: &str,
    values: Values,
    factory: &dyn TemplateFactory,
) -> Result<ConfigMap, BuildError> {
    bind_table(language, &mut Vec::new(), values, factory)
}

fn bind_table(
    language: &str,
    path: &mut Vec<String>,
    values: Values,
    factory: &dyn TemplateFactory,
) -> Result<ConfigMap, BuildError> {
    let mut configs = ConfigMap::new();
    for (key, entry) in values {
        path.push(key.clone());
        let config = match entry {
            Entry::Text(text) => {
                let renderer =
                    factory
                        .template(language, path, &text)
                        .map_err(|source| BuildError::Template {
                            name: template_name(language, path),
                            source,
                        })?;
                KeyConfig::Leaf(renderer)
            }
            Entry::Table(table) => KeyConfig::Table(bind_table(language, path, table, factory)?),
        };
        path.pop();
        configs.insert(key, config);
    }
    Ok(configs)
}
