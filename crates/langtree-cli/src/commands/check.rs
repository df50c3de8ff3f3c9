//! Implementation of the `langtree check` command.

use std::path::PathBuf;

use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::load_factory;
use crate::output::load_report;
use crate::output::table::{LanguageSummary, format_language_table};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Documents to check (.toml or .json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let factory = match load_factory(&args.files) {
        Ok(factory) => factory,
        Err(err) => {
            if args.json {
                println!("{}", json!({ "ok": false, "error": err.to_string() }));
            } else {
                eprintln!("{:?}", load_report(err));
            }
            return Ok(exitcode::DATAERR);
        }
    };

    let languages: Vec<LanguageSummary> = factory
        .languages()
        .into_iter()
        .map(|code| LanguageSummary {
            language: code.to_string(),
            fallback: factory.fallback_of(code).map(ToString::to_string),
            keys: factory.keys(code).len(),
        })
        .collect();

    if args.json {
        let output = json!({ "ok": true, "files": args.files.len(), "languages": languages });
        println!("{output}");
    } else {
        println!(
            "{} {} file(s), {} language(s)",
            "ok".if_supports_color(Stream::Stdout, |text| text.green()),
            args.files.len(),
            languages.len()
        );
        if !languages.is_empty() {
            println!("{}", format_language_table(&languages));
        }
    }
    Ok(exitcode::OK)
}
