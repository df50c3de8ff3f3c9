use std::collections::BTreeMap;

/// A decoded translation tree: keys mapped to text or to nested tables.
pub type Values = BTreeMap<String, Entry>;

/// One node of a decoded translation tree.
///
/// A key either holds translatable text or routes to a nested table, never
/// both. Decoders produce this shape from TOML tables and JSON objects.
///
/// # Example
///
/// ```
/// use langtree::{Entry, values};
///
/// let tree = values! {
///     "display" => values! { "hello" => "Hello" },
/// };
/// assert_eq!(tree["display"].get("hello"), Some(&Entry::from("Hello")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A translatable string, possibly a template.
    Text(String),

    /// A nested table of further keys.
    Table(Values),
}

impl Entry {
    /// Returns true if this entry carries nothing worth translating.
    ///
    /// Empty strings and empty tables never count as a definition: they are
    /// pruned before merging so they cannot shadow a fallback's text.
    pub fn is_empty(&self) -> bool {
        match self {
            Entry::Text(text) => text.is_empty(),
            Entry::Table(table) => table.is_empty(),
        }
    }

    /// Get this entry as text, if it is a leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(text) => Some(text),
            Entry::Table(_) => None,
        }
    }

    /// Get this entry as a table, if it is an interior node.
    pub fn as_table(&self) -> Option<&Values> {
        match self {
            Entry::Text(_) => None,
            Entry::Table(table) => Some(table),
        }
    }

    /// Look up a direct child of a table entry.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.as_table().and_then(|table| table.get(key))
    }
}

/// Remove empty leaves and empty tables, recursively.
///
/// Tables that only become empty once their own children are pruned are
/// removed as well.
pub fn prune(values: &mut Values) {
    values.retain(|_, entry| {
        if let Entry::Table(table) = entry {
            prune(table);
        }
        !entry.is_empty()
    });
}

impl From<String> for Entry {
    fn from(text: String) -> Self {
        Entry::Text(text)
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Entry::Text(text.to_string())
    }
}

impl From<Values> for Entry {
    fn from(table: Values) -> Self {
        Entry::Table(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;

    #[test]
    fn prune_removes_empty_leaves_and_tables() {
        let mut tree = values! {
            "a" => "",
            "b" => values! {},
            "c" => values! { "d" => "", "e" => values! { "f" => "" } },
            "g" => values! { "h" => "kept" },
        };
        prune(&mut tree);
        assert_eq!(tree, values! { "g" => values! { "h" => "kept" } });
    }
}
