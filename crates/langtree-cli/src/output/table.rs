//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};
use serde::Serialize;

/// Coverage of one language against the source language's keys.
pub struct LanguageCoverage {
    /// Language code (e.g., "es", "fr").
    pub language: String,
    /// The declared fallback, if any.
    pub fallback: Option<String>,
    /// Keys the language defines itself.
    pub own: usize,
    /// Keys it only resolves through its fallback chain.
    pub inherited: usize,
    /// Keys it cannot resolve at all.
    pub missing: Vec<String>,
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(source_count: usize, coverage: &[LanguageCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Language", "Fallback", "Own", "Via fallback", "Missing"]);

    for lang in coverage {
        table.add_row(vec![
            lang.language.clone(),
            lang.fallback.clone().unwrap_or_else(|| "-".to_string()),
            format!("{}/{}", lang.own, source_count),
            lang.inherited.to_string(),
            lang.missing.len().to_string(),
        ]);
    }

    table
}

/// One language of a built forest.
#[derive(Debug, Serialize)]
pub struct LanguageSummary {
    pub language: String,
    pub fallback: Option<String>,
    /// Number of leaf keys the language defines itself.
    pub keys: usize,
}

/// Format the languages of a forest with their fallback and key counts.
pub fn format_language_table(languages: &[LanguageSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Language", "Fallback", "Keys"]);

    for lang in languages {
        table.add_row(vec![
            lang.language.clone(),
            lang.fallback.clone().unwrap_or_else(|| "-".to_string()),
            lang.keys.to_string(),
        ]);
    }

    table
}
