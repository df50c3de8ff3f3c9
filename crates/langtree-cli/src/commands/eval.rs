//! Implementation of the `langtree eval` command.

use std::error::Error;
use std::path::PathBuf;

use langtree::{Message, TranslationError};
use miette::{IntoDiagnostic, miette};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue, json};

use super::load_factory;
use crate::output::load_report;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Language code to resolve in (e.g., en, es)
    #[arg(long, required = true)]
    pub lang: String,

    /// Dotted key to resolve
    #[arg(long, required = true)]
    pub key: String,

    /// Context fields in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Context as a JSON value; params are merged into it
    #[arg(long)]
    pub context: Option<String>,

    /// Do not consult fallback languages
    #[arg(long)]
    pub no_fallback: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Documents to load (.toml or .json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub language: String,
    pub key: String,
    pub text: String,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{s}': expected name=value"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Build the render context from `--context` and `--param`.
fn build_context(
    context: Option<&str>,
    params: Vec<(String, String)>,
) -> miette::Result<JsonValue> {
    let base = match context {
        Some(raw) => serde_json::from_str(raw).into_diagnostic()?,
        None => JsonValue::Null,
    };
    if params.is_empty() {
        return Ok(base);
    }

    let mut fields = match base {
        JsonValue::Null => JsonMap::new(),
        JsonValue::Object(fields) => fields,
        _ => return Err(miette!("--param requires --context to be a JSON object")),
    };
    for (name, value) in params {
        // Integers stay numbers; everything else is text.
        let value = match value.parse::<i64>() {
            Ok(n) => JsonValue::from(n),
            Err(_) => JsonValue::from(value),
        };
        fields.insert(name, value);
    }
    Ok(JsonValue::Object(fields))
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let context = build_context(args.context.as_deref(), args.params)?;
    let factory = match load_factory(&args.files) {
        Ok(factory) => factory,
        Err(err) => {
            eprintln!("{:?}", load_report(err));
            return Ok(exitcode::DATAERR);
        }
    };

    if !factory.has_language(&args.lang) {
        eprintln!(
            "unknown language '{}', available: {}",
            args.lang,
            factory.languages().join(", ")
        );
        return Ok(exitcode::DATAERR);
    }

    let mut message = Message::new(&args.key).with_context(context);
    if args.no_fallback {
        message = message.no_fallback();
    }

    match factory.lang(&args.lang).msg(message).or_err() {
        Ok(text) => {
            if args.json {
                let output = EvalResult {
                    language: args.lang,
                    key: args.key,
                    text,
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{text}");
            }
            Ok(exitcode::OK)
        }
        Err(err) => {
            let suggestions = match &err {
                TranslationError::NotFound { .. } => factory.suggest(&args.lang, &args.key),
                TranslationError::Render(_) => Vec::new(),
            };
            if args.json {
                let output = json!({ "error": err.to_string(), "suggestions": suggestions });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!(
                    "{}: {err}",
                    "error".if_supports_color(Stream::Stderr, |text| text.red())
                );
                let mut cause = err.source();
                while let Some(inner) = cause {
                    eprintln!("  caused by: {inner}");
                    cause = inner.source();
                }
                if !suggestions.is_empty() {
                    eprintln!("did you mean: {}", suggestions.join(", "));
                }
            }
            Ok(exitcode::DATAERR)
        }
    }
}
