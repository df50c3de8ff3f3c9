//! Coverage command implementation.

use std::path::PathBuf;

use clap::Args;
use langtree::LangFactory;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use super::load_factory;
use crate::output::load_report;
use crate::output::table::{LanguageCoverage, format_coverage_table};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Source language code whose keys define completeness (e.g., en).
    #[arg(long)]
    pub source: String,

    /// Languages to report (comma-separated). Defaults to every other language.
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Exit with non-zero code if any language misses a key.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,

    /// Documents to load (.toml or .json).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    language: String,
    fallback: Option<String>,
    own: usize,
    inherited: usize,
    total: usize,
    missing: Vec<String>,
}

/// Classify every source key for `language`.
fn language_coverage(factory: &LangFactory, language: &str, source_keys: &[String]) -> LanguageCoverage {
    let own_source = factory.lang_no_fallback(language);
    let source = factory.lang(language);

    let mut own = 0;
    let mut inherited = 0;
    let mut missing = Vec::new();
    for key in source_keys {
        if own_source.contains(key) {
            own += 1;
        } else if source.contains(key) {
            inherited += 1;
        } else {
            missing.push(key.clone());
        }
    }

    LanguageCoverage {
        language: language.to_string(),
        fallback: factory.fallback_of(language).map(ToString::to_string),
        own,
        inherited,
        missing,
    }
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let factory = match load_factory(&args.files) {
        Ok(factory) => factory,
        Err(err) => {
            eprintln!("{:?}", load_report(err));
            return Ok(exitcode::DATAERR);
        }
    };

    let source_language = args.source.to_lowercase();
    if !factory.has_language(&source_language) {
        eprintln!(
            "unknown source language '{}', available: {}",
            args.source,
            factory.languages().join(", ")
        );
        return Ok(exitcode::DATAERR);
    }
    let source_keys = factory.keys(&source_language);
    let source_count = source_keys.len();

    let languages: Vec<String> = if args.lang.is_empty() {
        factory
            .languages()
            .into_iter()
            .filter(|code| *code != source_language)
            .map(ToString::to_string)
            .collect()
    } else {
        args.lang.iter().map(|code| code.to_lowercase()).collect()
    };

    let coverage_data: Vec<LanguageCoverage> = languages
        .iter()
        .map(|language| language_coverage(&factory, language, &source_keys))
        .collect();

    // Check if any translation is incomplete
    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                language: c.language.clone(),
                fallback: c.fallback.clone(),
                own: c.own,
                inherited: c.inherited,
                total: source_count,
                missing: c.missing.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{json_output}");
    } else {
        println!("{}", format_coverage_table(source_count, &coverage_data));

        for lang_coverage in &coverage_data {
            if !lang_coverage.missing.is_empty() {
                println!("\nMissing in {}:", lang_coverage.language);
                for key in &lang_coverage.missing {
                    println!("  - {key}");
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use langtree::{Document, values};

    #[test]
    fn keys_are_split_into_own_inherited_and_missing() {
        let factory = LangFactory::new([
            Document::new("en", "", values! { "a" => "A", "b" => "B", "c" => "C" }),
            Document::new("es", "en", values! { "a" => "A-es" }),
            Document::new("fr", "", values! { "b" => "B-fr" }),
        ])
        .unwrap();
        let keys = factory.keys("en");

        let es = language_coverage(&factory, "es", &keys);
        assert_eq!((es.own, es.inherited), (1, 2));
        assert!(es.missing.is_empty());
        assert_eq!(es.fallback.as_deref(), Some("en"));

        let fr = language_coverage(&factory, "fr", &keys);
        assert_eq!((fr.own, fr.inherited), (1, 0));
        assert_eq!(fr.missing, ["a", "c"]);
    }
}
