//! CLI command implementations.

mod check;
mod coverage;
mod eval;

use std::path::PathBuf;

use langtree::{LangFactory, LoadError, Setup};
use tracing::debug;

pub use check::{CheckArgs, run_check};
pub use coverage::{CoverageArgs, run_coverage};
pub use eval::{EvalArgs, run_eval};

/// Decode `files` in order and build one forest from them.
fn load_factory(files: &[PathBuf]) -> Result<LangFactory, LoadError> {
    debug!(files = files.len(), "loading translation documents");
    Setup::builder().files(files.to_vec()).build().load()
}
