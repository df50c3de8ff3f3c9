//! Fallback graph resolution.
//!
//! Languages name at most one fallback each. This module orders them into a
//! forest: every language appears after the language it falls back to, so a
//! node's fallback is always an earlier arena index and chains terminate.

use std::collections::BTreeMap;

use tracing::debug;

use crate::interpreter::BuildError;

/// One language in the resolved forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestNode {
    pub language: String,
    /// Arena index of the fallback language's node.
    pub fallback: Option<usize>,
}

/// Languages in dependency order, each wired to its fallback by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackForest {
    pub nodes: Vec<ForestNode>,
    index: BTreeMap<String, usize>,
}

impl FallbackForest {
    /// Arena index of a language.
    pub fn index_of(&self, language: &str) -> Option<usize> {
        self.index.get(language).copied()
    }

    /// The number of languages on the longest chain.
    pub fn height(&self) -> usize {
        let mut depths: Vec<usize> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            // Parents precede children, so their depth is already known.
            let depth = node.fallback.map_or(1, |parent| depths[parent] + 1);
            depths.push(depth);
        }
        depths.into_iter().max().unwrap_or(0)
    }
}

/// Resolve a map of `language -> fallback` into a forest.
///
/// Works as a fixed point: each pass admits every pending language whose
/// fallback is empty or already admitted. A pass that admits nothing leaves
/// only cycles and references to undeclared languages; all of them are
/// reported together.
pub fn resolve_fallbacks(
    fallbacks: &BTreeMap<String, String>,
) -> Result<FallbackForest, BuildError> {
    let mut pending = fallbacks.clone();
    let mut forest = FallbackForest::default();

    while !pending.is_empty() {
        let ready: Vec<(String, String)> = pending
            .iter()
            .filter(|(_, fallback)| fallback.is_empty() || forest.index.contains_key(*fallback))
            .map(|(code, fallback)| (code.clone(), fallback.clone()))
            .collect();

        if ready.is_empty() {
            return Err(BuildError::InvalidFallbackChain {
                unresolved: pending.into_iter().collect(),
            });
        }

        for (code, fallback) in ready {
            pending.remove(&code);
            let parent = forest.index_of(&fallback);
            forest.index.insert(code.clone(), forest.nodes.len());
            forest.nodes.push(ForestNode {
                language: code,
                fallback: parent,
            });
        }
    }

    debug!(
        languages = forest.nodes.len(),
        height = forest.height(),
        "resolved fallback forest"
    );
    Ok(forest)
}
