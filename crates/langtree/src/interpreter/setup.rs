//! Fluent construction of a factory from files and in-memory documents.

use std::path::PathBuf;
use std::sync::Arc;

use bon::Builder;
use tracing::debug;

use crate::global;
use crate::interpreter::binder::{DefaultTemplateFactory, TemplateFactory};
use crate::interpreter::factory::LangFactory;
use crate::interpreter::LoadError;
use crate::parser::read_document;
use crate::types::Document;

/// Collects translation sources and builds a [`LangFactory`] from them.
///
/// Files are decoded in order, then in-memory documents are appended; the
/// combined list is merged exactly as [`LangFactory::new`] merges it.
///
/// # Example
///
/// ```
/// use langtree::{Document, Setup, values};
///
/// let factory = Setup::builder()
///     .documents(vec![Document::new("en", "", values! { "hello" => "Hello" })])
///     .build()
///     .load()
///     .unwrap();
///
/// assert_eq!(factory.lang("en").get("hello").text(), "Hello");
/// ```
#[derive(Builder)]
pub struct Setup {
    /// Document files, `.toml` or `.json`.
    #[builder(default, into)]
    files: Vec<PathBuf>,

    /// Documents that are not read from disk.
    #[builder(default, into)]
    documents: Vec<Document>,

    /// Template dialect; [`DefaultTemplateFactory`] if unset.
    template_factory: Option<Box<dyn TemplateFactory>>,
}

impl Setup {
    /// Decode every file and build the forest.
    pub fn load(self) -> Result<LangFactory, LoadError> {
        let mut documents = Vec::with_capacity(self.files.len() + self.documents.len());
        for path in &self.files {
            debug!(path = %path.display(), "reading translation document");
            documents.push(read_document(path)?);
        }
        documents.extend(self.documents);

        let factory = match &self.template_factory {
            Some(templates) => LangFactory::with_template_factory(templates.as_ref(), documents)?,
            None => LangFactory::with_template_factory(&DefaultTemplateFactory, documents)?,
        };
        Ok(factory)
    }

    /// Load, then install the result as the process-wide default.
    pub fn install(self) -> Result<Arc<LangFactory>, LoadError> {
        let factory = Arc::new(self.load()?);
        global::set_default(Arc::clone(&factory));
        Ok(factory)
    }
}
