//! Merging of multiple documents declared for the same language.

use std::collections::BTreeMap;

use tracing::warn;

use crate::interpreter::BuildError;
use crate::types::{Document, Entry, Values, prune};

/// All documents of one language folded into a single tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedInput {
    /// Lower-cased language code.
    pub language: String,
    /// Lower-cased fallback code, empty for a root language.
    pub fallback: String,
    /// The pruned union of every document's tree.
    pub values: Values,
}

impl MergedInput {
    /// Seed an accumulator from a document, normalizing codes and pruning.
    pub fn from_document(document: Document) -> Self {
        let mut values = document.values;
        prune(&mut values);
        Self {
            language: document.language.to_lowercase(),
            fallback: document.fallback.to_lowercase(),
            values,
        }
    }

    /// Fold `other` into this input.
    ///
    /// Both must declare the same fallback. Keys this input already defines
    /// win, unless both sides are tables, which merge recursively; any other
    /// overlap is a [`BuildError::ConflictingLeaf`].
    pub fn include(&mut self, other: MergedInput) -> Result<(), BuildError> {
        if self.fallback != other.fallback {
            return Err(BuildError::MismatchedDeclaration {
                language: self.language.clone(),
                expected: self.fallback.clone(),
                found: other.fallback,
            });
        }
        let mut values = other.values;
        prune(&mut values);
        merge_into_left(&mut self.values, values, &mut Vec::new()).map_err(|path| {
            BuildError::ConflictingLeaf {
                language: self.language.clone(),
                path,
            }
        })
    }
}

/// Group documents by language and merge each group in the order given.
///
/// Documents without a language take no part and are skipped.
pub fn merge_documents(
    documents: impl IntoIterator<Item = Document>,
) -> Result<BTreeMap<String, MergedInput>, BuildError> {
    let mut merged: BTreeMap<String, MergedInput> = BTreeMap::new();
    for document in documents {
        if document.language.is_empty() {
            warn!(
                keys = document.values.len(),
                "skipping translation document without a language"
            );
            continue;
        }
        let input = MergedInput::from_document(document);
        if let Some(existing) = merged.get_mut(&input.language) {
            existing.include(input)?;
        } else {
            merged.insert(input.language.clone(), input);
        }
    }
    Ok(merged)
}

/// Merge `right` into `left`, returning the dotted path of the first conflict.
fn merge_into_left(left: &mut Values, right: Values, path: &mut Vec<String>) -> Result<(), String> {
    for (key, incoming) in right {
        if incoming.is_empty() {
            continue;
        }
        let Some(existing) = left.get_mut(&key) else {
            left.insert(key, incoming);
            continue;
        };
        match (existing, incoming) {
            (Entry::Table(existing), Entry::Table(incoming)) => {
                path.push(key);
                merge_into_left(existing, incoming, path)?;
                path.pop();
            }
            _ => {
                path.push(key);
                return Err(path.join("."));
            }
        }
    }
    Ok(())
}
