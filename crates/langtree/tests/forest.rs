//! Integration tests for building translation forests from documents.

use langtree::interpreter::{merge_documents, resolve_fallbacks};
use langtree::{BuildError, Document, Entry, LangFactory, Values, values};
use std::collections::BTreeMap;

fn assert_pruned(values: &Values) {
    for (key, entry) in values {
        assert!(!entry.is_empty(), "empty entry at '{key}'");
        if let Entry::Table(children) = entry {
            assert_pruned(children);
        }
    }
}

// =========================================================================
// Document Merging
// =========================================================================

#[test]
fn documents_for_one_language_merge() {
    let factory = LangFactory::new([
        Document::new(
            "de",
            "en",
            values! { "validation" => values! { "email" => "Email error" } },
        ),
        Document::new(
            "de",
            "en",
            values! { "validation" => values! { "Class" => values! { "email" => "Class email error" } } },
        ),
        Document::new("en", "", values! {}),
    ])
    .unwrap();

    let de = factory.lang("de");
    assert_eq!(de.get("validation.email").text(), "Email error");
    assert_eq!(de.get("validation.Class.email").text(), "Class email error");
    assert_eq!(
        factory.keys("de"),
        ["validation.Class.email", "validation.email"]
    );
}

#[test]
fn third_document_redefining_a_leaf_conflicts() {
    let err = LangFactory::new([
        Document::new("de", "en", values! { "validation" => values! { "email" => "Email error" } }),
        Document::new(
            "de",
            "en",
            values! { "validation" => values! { "Class" => values! { "email" => "Class email error" } } },
        ),
        Document::new("de", "en", values! { "validation" => values! { "email" => "Other" } }),
        Document::new("en", "", values! {}),
    ])
    .unwrap_err();

    assert!(matches!(
        err,
        BuildError::ConflictingLeaf { ref language, ref path }
            if language == "de" && path == "validation.email"
    ));
}

#[test]
fn leaf_against_table_conflicts() {
    let err = LangFactory::new([
        Document::new("en", "", values! { "a" => "text" }),
        Document::new("en", "", values! { "a" => values! { "b" => "nested" } }),
    ])
    .unwrap_err();
    assert!(matches!(err, BuildError::ConflictingLeaf { ref path, .. } if path == "a"));
}

#[test]
fn differing_fallback_declarations_are_rejected() {
    let err = LangFactory::new([
        Document::new("en", "", values! {}),
        Document::new("fr", "", values! {}),
        Document::new("de", "en", values! { "a" => "x" }),
        Document::new("de", "fr", values! { "b" => "y" }),
    ])
    .unwrap_err();
    assert!(matches!(
        err,
        BuildError::MismatchedDeclaration { ref language, ref expected, ref found }
            if language == "de" && expected == "en" && found == "fr"
    ));
}

#[test]
fn fallback_declarations_compare_case_insensitively() {
    let factory = LangFactory::new([
        Document::new("en", "", values! { "a" => "x" }),
        Document::new("de", "EN", values! { "b" => "y" }),
        Document::new("DE", "en", values! { "c" => "z" }),
    ])
    .unwrap();
    assert_eq!(factory.languages(), ["de", "en"]);
    assert_eq!(factory.lang("de").get("a").text(), "x");
}

#[test]
fn empty_definitions_never_shadow() {
    let factory = LangFactory::new([
        Document::new("en", "", values! { "a" => "from en" }),
        Document::new(
            "es",
            "en",
            values! { "a" => "", "b" => values! { "c" => "" } },
        ),
    ])
    .unwrap();
    assert_eq!(factory.lang("es").get("a").text(), "from en");
    assert!(factory.keys("es").is_empty());
}

#[test]
fn merged_trees_are_pruned() {
    let merged = merge_documents([
        Document::new(
            "en",
            "",
            values! {
                "a" => values! { "b" => values! { "c" => "" } },
                "d" => "kept",
                "e" => values! {},
            },
        ),
        Document::new("en", "", values! { "f" => values! { "g" => "" } }),
    ])
    .unwrap();
    let values = &merged["en"].values;
    assert_pruned(values);
    assert_eq!(values.len(), 1);
}

// =========================================================================
// Fallback Graph
// =========================================================================

#[test]
fn two_language_cycle_names_both() {
    let err = LangFactory::new([
        Document::new("a", "b", values! { "x" => "1" }),
        Document::new("b", "a", values! { "x" => "2" }),
    ])
    .unwrap_err();
    let BuildError::InvalidFallbackChain { unresolved } = &err else {
        panic!("expected InvalidFallbackChain, got {err:?}");
    };
    let codes: Vec<&str> = unresolved.iter().map(|(code, _)| code.as_str()).collect();
    assert_eq!(codes, ["a", "b"]);
}

#[test]
fn undeclared_fallback_fails_the_build() {
    let err = LangFactory::new([Document::new("es", "en", values! { "x" => "1" })]).unwrap_err();
    assert!(matches!(err, BuildError::InvalidFallbackChain { .. }));
}

#[test]
fn cycle_beside_a_valid_tree_still_fails() {
    let err = LangFactory::new([
        Document::new("en", "", values! {}),
        Document::new("es", "en", values! {}),
        Document::new("x", "y", values! {}),
        Document::new("y", "x", values! {}),
    ])
    .unwrap_err();
    assert!(matches!(
        err,
        BuildError::InvalidFallbackChain { ref unresolved } if unresolved.len() == 2
    ));
}

#[test]
fn chains_terminate_within_the_forest_height() {
    let fallbacks: BTreeMap<String, String> = [("d", "c"), ("c", "b"), ("b", "a"), ("a", ""), ("e", "a")]
        .into_iter()
        .map(|(code, fallback)| (code.to_string(), fallback.to_string()))
        .collect();
    let forest = resolve_fallbacks(&fallbacks).unwrap();
    assert_eq!(forest.height(), 4);

    for start in 0..forest.nodes.len() {
        let mut steps = 1;
        let mut current = forest.nodes[start].fallback;
        while let Some(index) = current {
            assert!(index < start, "fallback must precede its dependent");
            steps += 1;
            current = forest.nodes[index].fallback;
        }
        assert!(steps <= forest.height());
    }
}

#[test]
fn documents_without_language_do_not_participate() {
    let factory = LangFactory::new([
        Document::new("", "", values! { "a" => "x" }),
        Document::new("en", "", values! { "b" => "y" }),
    ])
    .unwrap();
    assert_eq!(factory.languages(), ["en"]);
    assert!(!factory.lang("en").contains("a"));
}

#[test]
fn empty_input_builds_an_empty_factory() {
    let factory = LangFactory::new(Vec::new()).unwrap();
    assert!(factory.languages().is_empty());
    assert!(!factory.has_language("en"));
}
