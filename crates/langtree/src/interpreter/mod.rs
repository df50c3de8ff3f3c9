//! Langtree interpreter: building translation forests and answering lookups.
//!
//! Documents are merged per language, the fallback graph is resolved into an
//! arena, and every leaf string is compiled into a renderer once. Lookups
//! walk a language's tree and delegate misses along its fallback chain.

mod binder;
mod context;
mod error;
mod evaluator;
mod factory;
mod fallback;
mod merge;
mod setup;
mod source;

pub use binder::{
    ConfigMap, DefaultTemplateFactory, KeyConfig, TemplateFactory, bind_values, find_config,
    template_name,
};
pub use context::{Constant, RenderScope, Renderer, Translator, constant};
pub use error::{
    BuildError, LoadError, RenderError, TemplateError, TranslationError, compute_suggestions,
};
pub use evaluator::{CompiledTemplate, eval_template};
pub use factory::LangFactory;
pub use fallback::{FallbackForest, ForestNode, resolve_fallbacks};
pub use merge::{MergedInput, merge_documents};
pub use setup::Setup;
pub use source::LangSource;
