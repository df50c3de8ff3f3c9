//! Template string parser using winnow.
//!
//! Parses translation templates into an AST. Handles:
//! - Literal text segments
//! - Actions in `{{ }}`: field paths, string literals, `t` and `lang` calls
//! - Trim markers: `{{- ` eats whitespace before, ` -}}` after
//! - Comments: `{{/* ... */}}`

use winnow::ascii::multispace1;
use winnow::combinator::{alt, delimited, not, preceded, repeat, separated, terminated};
use winnow::prelude::*;
use winnow::token::{any, none_of, take_till, take_until, take_while};

use super::ast::{Action, Argument, FieldPath, Segment, Template};
use super::error::ParseError;

/// Opens an action. A string without it is constant text.
pub const ACTION_OPEN: &str = "{{";
const ACTION_CLOSE: &str = "}}";

/// Returns true if `raw` contains an action and must be compiled.
pub fn is_template(raw: &str) -> bool {
    raw.contains(ACTION_OPEN)
}

/// Parse a template string into an AST.
pub fn parse_template(input: &str) -> Result<Template, ParseError> {
    let mut remaining = input;
    let pieces: Vec<Piece<'_>> = match repeat(0.., piece).parse_next(&mut remaining) {
        Ok(pieces) => pieces,
        Err(_) => {
            let (line, column) = position(input, input.len() - remaining.len());
            return Err(ParseError::UnclosedAction { line, column });
        }
    };

    // Only an opening marker with no closing one stops the scan early.
    if !remaining.is_empty() {
        let (line, column) = position(input, input.len() - remaining.len());
        return Err(ParseError::UnclosedAction { line, column });
    }

    build_template(input, &pieces)
}

/// A raw slice of the template: text, or the body of one action.
#[derive(Debug, Clone, Copy)]
enum Piece<'s> {
    Text(&'s str),
    Action(&'s str),
}

impl Piece<'_> {
    fn source_len(self) -> usize {
        match self {
            Piece::Text(text) => text.len(),
            Piece::Action(body) => ACTION_OPEN.len() + body.len() + ACTION_CLOSE.len(),
        }
    }
}

fn piece<'s>(input: &mut &'s str) -> ModalResult<Piece<'s>> {
    alt((action, text)).parse_next(input)
}

fn action<'s>(input: &mut &'s str) -> ModalResult<Piece<'s>> {
    delimited(ACTION_OPEN, action_body, ACTION_CLOSE)
        .map(Piece::Action)
        .parse_next(input)
}

/// Everything up to the closing marker. Strings and comments are skipped
/// whole, so a `}}` inside them does not end the action.
fn action_body<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    repeat::<_, _, (), _, _>(0.., body_unit)
        .take()
        .parse_next(input)
}

fn body_unit(input: &mut &str) -> ModalResult<()> {
    alt((
        (
            '"',
            repeat::<_, _, (), _, _>(
                0..,
                alt((preceded('\\', any).void(), none_of(['"', '\\']).void())),
            ),
            '"',
        )
            .void(),
        ('`', take_till(0.., '`'), '`').void(),
        ("/*", take_until(0.., "*/"), "*/").void(),
        (not(ACTION_CLOSE), any).void(),
    ))
    .parse_next(input)
}

/// Text up to the next `{`, or a lone `{` that does not open an action.
fn text<'s>(input: &mut &'s str) -> ModalResult<Piece<'s>> {
    alt((
        take_while(1.., |c: char| c != '{'),
        terminated("{", not("{")),
    ))
    .map(Piece::Text)
    .parse_next(input)
}

fn build_template(input: &str, pieces: &[Piece<'_>]) -> Result<Template, ParseError> {
    let mut segments = Vec::new();
    let mut offset = 0;
    let mut trim_next = false;

    for &piece in pieces {
        match piece {
            Piece::Text(text) => {
                let text = if trim_next { text.trim_start() } else { text };
                push_literal(&mut segments, text);
                trim_next = false;
            }
            Piece::Action(body) => {
                let compiled =
                    compile_action(body).map_err(|error| error.at(position(input, offset)))?;
                if compiled.trim_before {
                    trim_trailing_literal(&mut segments);
                }
                match compiled.output {
                    Compiled::Nothing => {}
                    Compiled::Text(text) => push_literal(&mut segments, &text),
                    Compiled::Action(action) => segments.push(Segment::Action(action)),
                }
                trim_next = compiled.trim_after;
            }
        }
        offset += piece.source_len();
    }

    Ok(Template { segments })
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Literal(prev)) = segments.last_mut() {
        prev.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_string()));
    }
}

fn trim_trailing_literal(segments: &mut Vec<Segment>) {
    if let Some(Segment::Literal(prev)) = segments.last_mut() {
        let kept = prev.trim_end().len();
        prev.truncate(kept);
        if prev.is_empty() {
            segments.pop();
        }
    }
}

/// Calculate line and column for a byte offset into the template.
fn position(input: &str, offset: usize) -> (usize, usize) {
    let consumed = &input[..offset];
    let line = consumed.matches('\n').count() + 1;
    let line_start = consumed.rfind('\n').map_or(0, |pos| pos + 1);
    let column = consumed[line_start..].chars().count() + 1;
    (line, column)
}

struct CompiledAction {
    trim_before: bool,
    trim_after: bool,
    output: Compiled,
}

enum Compiled {
    Nothing,
    Text(String),
    Action(Action),
}

/// An action error before its location is known.
enum ActionError {
    Empty,
    Syntax(String),
    UnknownFunction(String),
    ArgumentCount {
        function: String,
        expected: &'static str,
        got: usize,
    },
}

impl ActionError {
    fn at(self, (line, column): (usize, usize)) -> ParseError {
        match self {
            ActionError::Empty => ParseError::EmptyAction { line, column },
            ActionError::Syntax(message) => ParseError::Syntax {
                line,
                column,
                message,
            },
            ActionError::UnknownFunction(name) => ParseError::UnknownFunction { name, line, column },
            ActionError::ArgumentCount {
                function,
                expected,
                got,
            } => ParseError::ArgumentCount {
                function,
                expected,
                got,
                line,
                column,
            },
        }
    }
}

fn compile_action(body: &str) -> Result<CompiledAction, ActionError> {
    let (trim_before, body) = match body.strip_prefix('-') {
        Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest),
        _ => (false, body),
    };
    let (trim_after, body) = match body.strip_suffix('-') {
        Some(rest) if rest.ends_with(char::is_whitespace) => (true, rest),
        _ => (false, body),
    };

    let inner = body.trim();
    if inner.is_empty() {
        return Err(ActionError::Empty);
    }

    let output = if let Some(comment) = inner.strip_prefix("/*") {
        if !comment.ends_with("*/") {
            return Err(ActionError::Syntax("unterminated comment".to_string()));
        }
        Compiled::Nothing
    } else {
        let parsed = pipeline.parse(inner).map_err(|e| {
            ActionError::Syntax(format!(
                "unexpected input at offset {} in '{inner}'",
                e.offset()
            ))
        })?;
        resolve_pipeline(parsed)?
    };

    Ok(CompiledAction {
        trim_before,
        trim_after,
        output,
    })
}

/// An action as written, before function names and arity are checked.
enum Pipeline {
    Field(FieldPath),
    Text(String),
    Call { name: String, args: Vec<Argument> },
}

fn resolve_pipeline(pipeline: Pipeline) -> Result<Compiled, ActionError> {
    match pipeline {
        Pipeline::Field(path) => Ok(Compiled::Action(Action::Field(path))),
        Pipeline::Text(text) => Ok(Compiled::Text(text)),
        Pipeline::Call { name, args } => translate_call(&name, &args).map(Compiled::Action),
    }
}

fn translate_call(name: &str, args: &[Argument]) -> Result<Action, ActionError> {
    let count = |expected| ActionError::ArgumentCount {
        function: name.to_string(),
        expected,
        got: args.len(),
    };
    match (name, args) {
        ("t", [key]) => Ok(Action::Translate {
            language: None,
            key: key.clone(),
            context: None,
        }),
        ("t", [key, context]) => Ok(Action::Translate {
            language: None,
            key: key.clone(),
            context: Some(context.clone()),
        }),
        ("lang", [language, key]) => Ok(Action::Translate {
            language: Some(language.clone()),
            key: key.clone(),
            context: None,
        }),
        ("lang", [language, key, context]) => Ok(Action::Translate {
            language: Some(language.clone()),
            key: key.clone(),
            context: Some(context.clone()),
        }),
        ("t", _) => Err(count("1 or 2")),
        ("lang", _) => Err(count("2 or 3")),
        _ => Err(ActionError::UnknownFunction(name.to_string())),
    }
}

fn pipeline(input: &mut &str) -> ModalResult<Pipeline> {
    alt((
        field_path.map(Pipeline::Field),
        string_literal.map(Pipeline::Text),
        call,
    ))
    .parse_next(input)
}

fn call(input: &mut &str) -> ModalResult<Pipeline> {
    let name = identifier.parse_next(input)?;
    let args: Vec<Argument> = repeat(0.., preceded(multispace1, argument)).parse_next(input)?;
    Ok(Pipeline::Call {
        name: name.to_string(),
        args,
    })
}

fn argument(input: &mut &str) -> ModalResult<Argument> {
    alt((
        field_path.map(Argument::Field),
        string_literal.map(Argument::Str),
    ))
    .parse_next(input)
}

/// `.`, `.Name`, `.User.Name`, `.Items.0`
fn field_path(input: &mut &str) -> ModalResult<FieldPath> {
    let segments: Vec<&str> = preceded('.', separated(0.., identifier, '.')).parse_next(input)?;
    Ok(FieldPath::new(segments))
}

fn identifier<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

fn string_literal(input: &mut &str) -> ModalResult<String> {
    alt((quoted, raw_string)).parse_next(input)
}

/// A double-quoted string with `\"`, `\\`, `\n` and `\t` escapes.
fn quoted(input: &mut &str) -> ModalResult<String> {
    delimited('"', repeat(0.., quoted_char), '"').parse_next(input)
}

fn quoted_char(input: &mut &str) -> ModalResult<char> {
    alt((none_of(['"', '\\']), preceded('\\', escape))).parse_next(input)
}

fn escape(input: &mut &str) -> ModalResult<char> {
    alt((
        '"'.value('"'),
        '\\'.value('\\'),
        'n'.value('\n'),
        't'.value('\t'),
    ))
    .parse_next(input)
}

/// A backtick string, taken verbatim.
fn raw_string(input: &mut &str) -> ModalResult<String> {
    delimited('`', take_till(0.., '`'), '`')
        .map(ToString::to_string)
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_counts_lines_and_columns() {
        assert_eq!(position("abc", 0), (1, 1));
        assert_eq!(position("abc", 2), (1, 3));
        assert_eq!(position("a\nbc", 3), (2, 2));
    }

    #[test]
    fn position_columns_count_characters() {
        assert_eq!(position("ñññ {{", 7), (1, 5));
        assert_eq!(position("x\nñ{{", 4), (2, 2));
    }

    #[test]
    fn lone_brace_is_text() {
        let t = parse_template("a { b } c").unwrap();
        assert_eq!(t.segments, vec![Segment::Literal("a { b } c".into())]);
    }

    #[test]
    fn action_offsets_follow_previous_pieces() {
        let err = parse_template("Hi {{ .A }}\n{{ nope }}").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnknownFunction { line: 2, column: 1, .. }
        ));
    }
}
