pub mod global;
pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    BuildError, DefaultTemplateFactory, LangFactory, LangSource, LoadError, RenderError, Renderer,
    Setup, TemplateError, TemplateFactory, TranslationError, Translator, compute_suggestions,
};
pub use parser::{DecodeError, ParseError, read_document};
pub use types::{Document, Entry, Message, Translation, Values};

/// Creates a [`Values`] tree from key-value pairs.
///
/// Values are converted via `Into<Entry>`, so strings become text leaves and
/// nested `values!` invocations become tables.
///
/// # Example
///
/// ```
/// use langtree::{Entry, values};
///
/// let v = values! {
///     "hello" => "Hello",
///     "display" => values! { "bye" => "Bye" },
/// };
/// assert_eq!(v.len(), 2);
/// assert_eq!(v["hello"].as_text(), Some("Hello"));
/// assert!(matches!(v["display"], Entry::Table(_)));
/// ```
#[macro_export]
macro_rules! values {
    {} => {
        $crate::Values::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Values::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Entry>::into($value));
            )+
            map
        }
    };
}
