//! Tests for error types and error message formatting.

use insta::assert_snapshot;
use langtree::{
    DecodeError, Document, LangFactory, LoadError, ParseError, TranslationError,
    compute_suggestions, parser, values,
};
use std::path::PathBuf;

fn en_es() -> LangFactory {
    LangFactory::new([
        Document::new(
            "en",
            "",
            values! { "display" => values! { "hello_name" => "Hello, {{.Name}}" } },
        ),
        Document::new(
            "es",
            "en",
            values! { "display" => values! { "missing" => r#"{{ t "display.nope" }}"# } },
        ),
    ])
    .unwrap()
}

// =========================================================================
// Suggestions
// =========================================================================

#[test]
fn compute_suggestions_finds_similar_keys() {
    let available = vec![
        "display.hello".to_string(),
        "display.help".to_string(),
        "display.bye".to_string(),
    ];

    let suggestions = compute_suggestions("display.helo", &available);
    assert_eq!(suggestions, ["display.hello", "display.help"]);

    assert!(compute_suggestions("nothing.close", &available).is_empty());
}

#[test]
fn short_keys_tolerate_one_edit() {
    let available = vec!["one".to_string(), "two".to_string()];
    assert_eq!(compute_suggestions("on", &available), ["one"]);
    assert!(compute_suggestions("tw_x", &available).len() <= 1);
    assert!(compute_suggestions("xo", &available).is_empty());
}

#[test]
fn compute_suggestions_limits_to_three() {
    let available: Vec<String> = (0..10).map(|i| format!("item{i}")).collect();
    assert_eq!(compute_suggestions("item", &available).len(), 3);
}

// =========================================================================
// Build Errors
// =========================================================================

#[test]
fn conflicting_leaf_message() {
    let err = LangFactory::new([
        Document::new("de", "", values! { "validation" => values! { "email" => "a" } }),
        Document::new("de", "", values! { "validation" => values! { "email" => "b" } }),
    ])
    .unwrap_err();
    assert_snapshot!(err.to_string(), @"language 'de': cannot merge key 'validation.email', it is already defined");
}

#[test]
fn mismatched_declaration_message() {
    let err = LangFactory::new([
        Document::new("de", "en", values! {}),
        Document::new("de", "fr", values! {}),
    ])
    .unwrap_err();
    assert_snapshot!(err.to_string(), @"language 'de' is declared with fallback 'fr', expected 'en'");
}

#[test]
fn invalid_fallback_chain_message() {
    let err = LangFactory::new([
        Document::new("b", "a", values! {}),
        Document::new("a", "b", values! {}),
    ])
    .unwrap_err();
    assert_snapshot!(err.to_string(), @"invalid fallback chain: a -> b, b -> a");
}

#[test]
fn template_error_names_language_and_path() {
    let err = LangFactory::new([Document::new(
        "en",
        "",
        values! { "a" => values! { "b" => "{{ .x" } },
    )])
    .unwrap_err();
    assert_snapshot!(err.to_string(), @"template '[en]a.b': unclosed action at 1:1");
}

// =========================================================================
// Parse and Decode Errors
// =========================================================================

#[test]
fn parse_error_messages() {
    let err: ParseError = parser::parse_template("{{ t }}").unwrap_err();
    assert_snapshot!(err.to_string(), @"'t' expects 1 or 2 arguments, got 0 at 1:1");

    let err = parser::parse_template("ok {{ shout .X }}").unwrap_err();
    assert_snapshot!(err.to_string(), @"unknown function 'shout' at 1:4");
}

#[test]
fn decode_error_messages() {
    let err: DecodeError = parser::parse_toml_document("[a.b]\ncount = 3").unwrap_err();
    assert_snapshot!(err.to_string(), @"unsupported integer value at 'a.b.count'");

    let err = parser::parse_json_document(r#"{ "fallback": ["en"] }"#).unwrap_err();
    assert_snapshot!(err.to_string(), @"'fallback' must be a string, found array");
}

#[test]
fn load_error_messages() {
    let err = LoadError::UnsupportedFormat {
        path: PathBuf::from("i18n/en.yaml"),
    };
    assert_snapshot!(err.to_string(), @"unsupported document format for 'i18n/en.yaml', expected .toml or .json");
}

// =========================================================================
// Render and Translation Errors
// =========================================================================

#[test]
fn render_error_messages() {
    let factory = en_es();

    let result = factory.lang("en").get("display.hello_name");
    let err = result.error().unwrap();
    assert_snapshot!(err.to_string(), @"template '[en]display.hello_name': no value for '.Name'");

    let result = factory.lang("es").get("display.missing");
    let err = result.error().unwrap();
    assert_snapshot!(err.to_string(), @"template '[es]display.missing': translation 'display.nope' not found for language 'es'");
}

#[test]
fn not_found_message_uses_the_dotted_key() {
    let err: TranslationError = en_es().lang("es").get("display.bye").or_err().unwrap_err();
    assert_snapshot!(err.to_string(), @"translation not found: 'display.bye'");
}
