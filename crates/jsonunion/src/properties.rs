//! Top-level property inspection with case-insensitive lookup.

use std::collections::HashMap;

use crate::engine::{JsonEngine, SerdeJsonEngine};

/// The top-level property names of one JSON object.
///
/// Lookups go through a map keyed by the lower-cased name, so `contains("prop1")`
/// finds a document key spelled `"Prop1"`. Iteration yields the names in their
/// original casing. Names that differ only in case collapse into one entry;
/// the first one seen keeps its spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    names: Vec<String>,
    folded: HashMap<String, usize>,
}

impl PropertySet {
    pub fn from_keys<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = PropertySet::default();
        for key in keys {
            let folded = fold(key);
            if set.folded.contains_key(&folded) {
                continue;
            }
            set.folded.insert(folded, set.names.len());
            set.names.push(key.to_owned());
        }
        set
    }

    /// Inspect a `serde_json::Value`; `None` when it is not an object.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        properties(&SerdeJsonEngine, value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.folded.contains_key(&fold(key))
    }

    /// The document's own spelling of `key`, looked up case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.folded
            .get(&fold(key))
            .map(|&idx| self.names[idx].as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Property set of `document`, or `None` when its top level is not an object.
pub fn properties<E: JsonEngine>(engine: &E, document: &E::Document) -> Option<PropertySet> {
    engine.top_level_keys(document).map(PropertySet::from_keys)
}

fn fold(key: &str) -> String {
    key.to_lowercase()
}
