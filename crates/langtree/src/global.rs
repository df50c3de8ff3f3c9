//! Process-wide default factory.
//!
//! Holds a shared [`LangFactory`] so call sites can translate without
//! threading a factory through. Replacing the default never disturbs lookups
//! already running: each holds the `Arc` it started with.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::interpreter::LangFactory;
use crate::types::{Message, Translation};

static DEFAULT_FACTORY: RwLock<Option<Arc<LangFactory>>> = RwLock::new(None);

static EMPTY_FACTORY: LazyLock<Arc<LangFactory>> = LazyLock::new(|| Arc::new(LangFactory::empty()));

/// Install `factory` as the default, replacing any previous one.
pub fn set_default(factory: impl Into<Arc<LangFactory>>) {
    let factory = factory.into();
    let languages = factory.languages().len();
    let mut guard = DEFAULT_FACTORY.write().unwrap_or_else(PoisonError::into_inner);
    if guard.is_some() {
        warn!(languages, "replacing the default translation factory");
    } else {
        debug!(languages, "installed the default translation factory");
    }
    *guard = Some(factory);
}

/// Remove the default; lookups through this module then miss.
pub fn clear_default() {
    let mut guard = DEFAULT_FACTORY.write().unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

/// The installed default, if any.
pub fn default_factory() -> Option<Arc<LangFactory>> {
    DEFAULT_FACTORY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Run `f` against the default, or against an empty factory if none is set.
///
/// The lock is released before `f` runs.
pub fn with_default<T>(f: impl FnOnce(&LangFactory) -> T) -> T {
    let factory = default_factory().unwrap_or_else(|| Arc::clone(&EMPTY_FACTORY));
    f(&factory)
}

/// Look up `key` for `language` in the default factory.
pub fn get(language: &str, key: &str) -> Translation {
    with_default(|factory| factory.lang(language).get(key))
}

/// Look up `key` for `language` in the default factory, with a context.
pub fn get_with(language: &str, key: &str, context: impl Into<JsonValue>) -> Translation {
    with_default(|factory| factory.lang(language).get_with(key, context))
}

/// Resolve a prepared message for `language` in the default factory.
pub fn msg(language: &str, message: Message) -> Translation {
    with_default(|factory| factory.lang(language).msg(message))
}
