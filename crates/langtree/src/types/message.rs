use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use serde_json::Value as JsonValue;

/// A translation query.
///
/// The key is split on `.` into path segments when the message is built.
/// Empty segments (from a leading, trailing or doubled dot) are kept as-is;
/// they never match a tree node, so such keys simply resolve to nothing.
///
/// The context is handed to the leaf's renderer untouched. It defaults to
/// JSON `null`.
///
/// # Example
///
/// ```
/// use langtree::Message;
/// use serde_json::json;
///
/// let msg = Message::new("display.hello_name").with_context(json!({ "Name": "Wut" }));
/// assert_eq!(msg.key_path(), ["display", "hello_name"]);
/// assert_eq!(msg.key(), "display.hello_name");
/// assert!(!msg.is_no_fallback());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    key: Vec<String>,
    context: JsonValue,
    no_fallback: bool,
}

impl Message {
    /// Build a message for a dotted key with no context.
    pub fn new(key: &str) -> Self {
        Self {
            key: key.split('.').map(ToString::to_string).collect(),
            context: JsonValue::Null,
            no_fallback: false,
        }
    }

    /// Attach a context value for the renderer.
    pub fn with_context(mut self, context: impl Into<JsonValue>) -> Self {
        self.context = context.into();
        self
    }

    /// Attach any serializable value as the context.
    pub fn with_serialized<T: Serialize + ?Sized>(
        mut self,
        context: &T,
    ) -> Result<Self, serde_json::Error> {
        self.context = serde_json::to_value(context)?;
        Ok(self)
    }

    /// Restrict this query to the source it is sent to, never its fallbacks.
    pub fn no_fallback(mut self) -> Self {
        self.no_fallback = true;
        self
    }

    /// The key as path segments.
    pub fn key_path(&self) -> &[String] {
        &self.key
    }

    /// The key rejoined with dots, as it was given.
    pub fn key(&self) -> String {
        self.key.join(".")
    }

    /// Returns true for the zero-length key, which never resolves.
    pub fn is_empty_key(&self) -> bool {
        self.key.iter().all(String::is_empty) && self.key.len() <= 1
    }

    /// The context passed to renderers.
    pub fn context(&self) -> &JsonValue {
        &self.context
    }

    /// Returns true if fallback delegation is disabled for this query.
    pub fn is_no_fallback(&self) -> bool {
        self.no_fallback
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.key.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_empty_segments() {
        assert_eq!(Message::new(".a.").key_path(), ["", "a", ""]);
        assert_eq!(Message::new("a..b").key_path(), ["a", "", "b"]);
    }

    #[test]
    fn only_the_zero_length_key_is_empty() {
        assert!(Message::new("").is_empty_key());
        assert!(!Message::new(".").is_empty_key());
        assert!(!Message::new("a").is_empty_key());
    }

    #[derive(Serialize)]
    struct User {
        #[serde(rename = "Name")]
        name: String,
    }

    #[test]
    fn serialized_context_becomes_json() {
        let user = User {
            name: "Wut".to_string(),
        };
        let msg = Message::new("a").with_serialized(&user).unwrap();
        assert_eq!(msg.context()["Name"], "Wut");
    }
}
