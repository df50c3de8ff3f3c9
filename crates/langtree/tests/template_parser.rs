//! Tests for the template dialect parser.

use langtree::ParseError;
use langtree::parser::{
    Action, Argument, FieldPath, Segment, Template, is_template, parse_template,
};

fn literal(text: &str) -> Segment {
    Segment::Literal(text.to_string())
}

fn field(path: &[&str]) -> Segment {
    Segment::Action(Action::Field(FieldPath::new(path.iter().copied())))
}

// =========================================================================
// Literals and Fields
// =========================================================================

#[test]
fn marker_free_text_is_not_a_template() {
    assert!(!is_template("Hello, {Name}"));
    assert!(!is_template("closing }} only"));
    assert!(is_template("Hello, {{.Name}}"));
}

#[test]
fn plain_text_is_one_literal() {
    let template = parse_template("Hello, world").unwrap();
    assert_eq!(template.segments, vec![literal("Hello, world")]);
}

#[test]
fn field_paths() {
    let template = parse_template("{{ . }}{{.Name}}{{ .User.Name }}{{ .Items.0 }}").unwrap();
    assert_eq!(
        template,
        Template {
            segments: vec![
                field(&[]),
                field(&["Name"]),
                field(&["User", "Name"]),
                field(&["Items", "0"]),
            ]
        }
    );
}

#[test]
fn text_around_fields() {
    let template = parse_template("Hello, {{.Name}}!").unwrap();
    assert_eq!(
        template.segments,
        vec![literal("Hello, "), field(&["Name"]), literal("!")]
    );
}

#[test]
fn string_literals_merge_into_text() {
    let template = parse_template(r#"a{{ "{{" }}b{{ `\n` }}c"#).unwrap();
    assert_eq!(template.segments, vec![literal(r"a{{b\nc")]);
}

#[test]
fn quoted_escapes() {
    let template = parse_template(r#"{{ "say \"hi\"\n\\" }}"#).unwrap();
    assert_eq!(template.segments, vec![literal("say \"hi\"\n\\")]);
}

#[test]
fn closing_marker_inside_a_string_is_text() {
    let template = parse_template(r#"[{{ "}}" }}]{{ `a }} b` }}"#).unwrap();
    assert_eq!(template.segments, vec![literal("[}}]a }} b")]);

    let template = parse_template(r#"{{ t "x\"}}" .A }}"#).unwrap();
    assert_eq!(
        template.segments,
        vec![Segment::Action(Action::Translate {
            language: None,
            key: Argument::Str("x\"}}".to_string()),
            context: Some(Argument::Field(FieldPath::new(["A"]))),
        })]
    );
}

// =========================================================================
// Trim Markers and Comments
// =========================================================================

#[test]
fn trim_markers_eat_surrounding_whitespace() {
    let template = parse_template("a \n {{- .X -}} \n b").unwrap();
    assert_eq!(
        template.segments,
        vec![literal("a"), field(&["X"]), literal("b")]
    );
}

#[test]
fn dash_without_space_is_not_a_trim_marker() {
    let err = parse_template("a {{-.X}}").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
}

#[test]
fn comments_render_nothing() {
    let template = parse_template("a{{/* note */}}b").unwrap();
    assert_eq!(template.segments, vec![literal("ab")]);

    let template = parse_template("a {{- /* note */ -}} b").unwrap();
    assert_eq!(template.segments, vec![literal("ab")]);
}

#[test]
fn comments_may_contain_the_closing_marker() {
    let template = parse_template("a{{/* x }} y */}}b").unwrap();
    assert_eq!(template.segments, vec![literal("ab")]);
}

// =========================================================================
// Translate Calls
// =========================================================================

#[test]
fn t_with_key_only() {
    let template = parse_template(r#"{{ t "display.hello" }}"#).unwrap();
    assert_eq!(
        template.segments,
        vec![Segment::Action(Action::Translate {
            language: None,
            key: Argument::Str("display.hello".to_string()),
            context: None,
        })]
    );
}

#[test]
fn t_with_context_argument() {
    let template = parse_template(r#"{{ t "display.hello_name" .User }}"#).unwrap();
    assert_eq!(
        template.segments,
        vec![Segment::Action(Action::Translate {
            language: None,
            key: Argument::Str("display.hello_name".to_string()),
            context: Some(Argument::Field(FieldPath::new(["User"]))),
        })]
    );
}

#[test]
fn lang_with_field_language() {
    let template = parse_template(r#"{{ lang .Lang "display.hello" . }}"#).unwrap();
    assert_eq!(
        template.segments,
        vec![Segment::Action(Action::Translate {
            language: Some(Argument::Field(FieldPath::new(["Lang"]))),
            key: Argument::Str("display.hello".to_string()),
            context: Some(Argument::Field(FieldPath::dot())),
        })]
    );
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn unclosed_action_reports_its_start() {
    let err = parse_template("Hello {{ .Name").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnclosedAction { line: 1, column: 7 }
    ));
}

#[test]
fn empty_action() {
    assert!(matches!(
        parse_template("x{{  }}").unwrap_err(),
        ParseError::EmptyAction { line: 1, column: 2 }
    ));
}

#[test]
fn unknown_function() {
    let err = parse_template("{{ upper .Name }}").unwrap_err();
    assert!(matches!(err, ParseError::UnknownFunction { ref name, .. } if name == "upper"));
}

#[test]
fn argument_counts() {
    assert!(matches!(
        parse_template("{{ t }}").unwrap_err(),
        ParseError::ArgumentCount { ref function, got: 0, .. } if function == "t"
    ));
    assert!(matches!(
        parse_template(r#"{{ lang "en" }}"#).unwrap_err(),
        ParseError::ArgumentCount { ref function, got: 1, .. } if function == "lang"
    ));
    assert!(matches!(
        parse_template(r#"{{ t "a" . . }}"#).unwrap_err(),
        ParseError::ArgumentCount { got: 3, .. }
    ));
}

#[test]
fn malformed_actions_are_syntax_errors() {
    for source in [
        "{{ .Name. }}",
        r#"{{ "open }}"#,
        "{{/* open }}",
        "{{ .A .B }}",
        "{{ t key }}",
    ] {
        let err = parse_template(source).unwrap_err();
        assert!(
            matches!(err, ParseError::Syntax { .. }),
            "{source}: {err:?}"
        );
    }
}

#[test]
fn columns_count_characters_not_bytes() {
    let err = parse_template("ñññ {{ nope }}").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnknownFunction { line: 1, column: 5, .. }
    ));
}

#[test]
fn errors_on_later_lines_carry_their_position() {
    let err = parse_template("line one\nline {{ two").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnclosedAction { line: 2, column: 6 }
    ));
}
