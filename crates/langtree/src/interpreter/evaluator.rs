//! Template evaluation engine.
//!
//! Walks a parsed [`Template`] against a JSON context, producing text.
//! Literal segments are copied; field actions read from the context; translate
//! actions re-enter lookup through the scope's [`Translator`].

use serde_json::Value as JsonValue;

use crate::interpreter::context::{RenderScope, Renderer, Translator};
use crate::interpreter::{RenderError, TranslationError};
use crate::parser::ast::{Action, Argument, FieldPath, Segment, Template};
use crate::parser::json_kind;
use crate::types::Message;

/// A template compiled by the default template factory.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    name: String,
    language: String,
    template: Template,
}

impl CompiledTemplate {
    pub fn new(name: String, language: String, template: Template) -> Self {
        Self {
            name,
            language,
            template,
        }
    }
}

impl Renderer for CompiledTemplate {
    fn render(
        &self,
        context: &JsonValue,
        translator: &dyn Translator,
    ) -> Result<String, RenderError> {
        let scope = RenderScope {
            name: &self.name,
            language: &self.language,
            context,
            translator,
        };
        eval_template(&self.template, &scope)
    }
}

/// Evaluate a template AST, producing a formatted string.
///
/// # Errors
///
/// Returns an error if:
/// - A field path cannot be resolved in the context
/// - A translate action gets a non-string language or key
/// - A nested translation is missing or fails
pub fn eval_template(template: &Template, scope: &RenderScope<'_>) -> Result<String, RenderError> {
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Action(Action::Field(path)) => {
                let value = resolve_field(path, scope)?;
                write_value(&mut output, value);
            }
            Segment::Action(Action::Translate {
                language,
                key,
                context,
            }) => {
                let text = eval_translate(language.as_ref(), key, context.as_ref(), scope)?;
                output.push_str(&text);
            }
        }
    }
    Ok(output)
}

fn eval_translate(
    language: Option<&Argument>,
    key: &Argument,
    context: Option<&Argument>,
    scope: &RenderScope<'_>,
) -> Result<String, RenderError> {
    let language = match language {
        Some(argument) => string_argument(argument, scope)?,
        None => scope.language.to_string(),
    };
    let key = string_argument(key, scope)?;
    let context = match context {
        Some(argument) => argument_value(argument, scope)?,
        None => scope.context.clone(),
    };

    let message = Message::new(&key).with_context(context);
    match scope.translator.translate(&language, &message).or_err() {
        Ok(text) => Ok(text),
        Err(TranslationError::NotFound { key }) => Err(RenderError::NestedNotFound {
            template: scope.name.to_string(),
            language,
            key,
        }),
        Err(TranslationError::Render(source)) => Err(RenderError::Nested {
            template: scope.name.to_string(),
            key,
            source: Box::new(source),
        }),
    }
}

fn argument_value(argument: &Argument, scope: &RenderScope<'_>) -> Result<JsonValue, RenderError> {
    match argument {
        Argument::Str(text) => Ok(JsonValue::String(text.clone())),
        Argument::Field(path) => resolve_field(path, scope).cloned(),
    }
}

fn string_argument(argument: &Argument, scope: &RenderScope<'_>) -> Result<String, RenderError> {
    match argument {
        Argument::Str(text) => Ok(text.clone()),
        Argument::Field(path) => match resolve_field(path, scope)? {
            JsonValue::String(text) => Ok(text.clone()),
            other => Err(RenderError::NotAString {
                template: scope.name.to_string(),
                kind: json_kind(other),
            }),
        },
    }
}

/// Follow a field path through objects (by key) and arrays (by index).
fn resolve_field<'s>(path: &FieldPath, scope: &RenderScope<'s>) -> Result<&'s JsonValue, RenderError> {
    let mut current = scope.context;
    for segment in &path.segments {
        current = match current {
            JsonValue::Object(object) => object.get(segment),
            JsonValue::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            other => {
                return Err(RenderError::NotIndexable {
                    template: scope.name.to_string(),
                    field: path.to_string(),
                    kind: json_kind(other),
                });
            }
        }
        .ok_or_else(|| RenderError::MissingField {
            template: scope.name.to_string(),
            field: path.to_string(),
        })?;
    }
    Ok(current)
}

/// Strings verbatim, `null` as nothing, containers as compact JSON.
fn write_value(output: &mut String, value: &JsonValue) {
    match value {
        JsonValue::Null => {}
        JsonValue::String(text) => output.push_str(text),
        JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::Array(_) | JsonValue::Object(_) => {
            output.push_str(&value.to_string());
        }
    }
}
