mod document;
mod entry;
mod message;
mod translation;

pub use document::Document;
pub use entry::{Entry, Values, prune};
pub use message::Message;
pub use translation::Translation;
