//! The seam between the decoder and a concrete JSON library.
//!
//! The decoder only needs four capabilities: parse text, recognise `null`,
//! list the top-level keys of an object, and map a parsed document onto a
//! typed value. [`JsonEngine`] names exactly those. [`SerdeJsonEngine`] is
//! the default implementation over `serde_json`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::MalformedCategory;

/// An engine-neutral parse or mapping failure.
///
/// Engines translate their own error types into this before handing control
/// back to the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed {
    pub category: MalformedCategory,
    pub message: String,
    /// One-based line of the failure, 0 when the engine has no position.
    pub line: usize,
    /// One-based column of the failure, 0 when the engine has no position.
    pub column: usize,
}

impl Malformed {
    pub fn new(category: MalformedCategory, message: impl Into<String>) -> Self {
        Malformed {
            category,
            message: message.into(),
            line: 0,
            column: 0,
        }
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

/// A JSON library usable by the decoder.
///
/// Implementations hold no state between calls.
pub trait JsonEngine {
    /// Parsed tree representation.
    type Document;

    /// Options forwarded verbatim to [`JsonEngine::map_to`].
    type Options: Default;

    /// Parse `text` into a document.
    fn parse(&self, text: &str) -> Result<Self::Document, Malformed>;

    /// Whether the document is the JSON literal `null`.
    fn is_null(&self, document: &Self::Document) -> bool;

    /// Top-level property names, or `None` when the document is not an object.
    fn top_level_keys<'d>(&self, document: &'d Self::Document) -> Option<Vec<&'d str>>;

    /// Map a document onto the target shape `T`.
    fn map_to<T: DeserializeOwned>(
        &self,
        document: Self::Document,
        options: &Self::Options,
    ) -> Result<T, Malformed>;
}

/// How object keys are presented to the mapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyFolding {
    /// Keys are passed through untouched.
    #[default]
    Preserve,
    /// Every object key, at any depth, is lower-cased before mapping.
    ///
    /// Lets `{"Prop1": 1}` map onto a shape whose serde name is `prop1`.
    Lowercase,
}

/// Mapping options for [`SerdeJsonEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapperOptions {
    pub key_folding: KeyFolding,
}

impl MapperOptions {
    pub fn with_key_folding(mut self, key_folding: KeyFolding) -> Self {
        self.key_folding = key_folding;
        self
    }
}

/// [`JsonEngine`] over `serde_json::Value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonEngine;

impl JsonEngine for SerdeJsonEngine {
    type Document = Value;
    type Options = MapperOptions;

    fn parse(&self, text: &str) -> Result<Value, Malformed> {
        serde_json::from_str(text).map_err(|e| to_malformed(&e))
    }

    fn is_null(&self, document: &Value) -> bool {
        document.is_null()
    }

    fn top_level_keys<'d>(&self, document: &'d Value) -> Option<Vec<&'d str>> {
        document
            .as_object()
            .map(|obj| obj.keys().map(String::as_str).collect())
    }

    fn map_to<T: DeserializeOwned>(
        &self,
        document: Value,
        options: &MapperOptions,
    ) -> Result<T, Malformed> {
        let document = match options.key_folding {
            KeyFolding::Preserve => document,
            KeyFolding::Lowercase => fold_keys(document),
        };
        serde_json::from_value(document).map_err(|e| to_malformed(&e))
    }
}

fn to_malformed(err: &serde_json::Error) -> Malformed {
    use serde_json::error::Category;

    let category = match err.classify() {
        Category::Io => MalformedCategory::Io,
        Category::Syntax => MalformedCategory::Syntax,
        Category::Data => MalformedCategory::Shape,
        Category::Eof => MalformedCategory::Eof,
    };
    Malformed::new(category, err.to_string()).at(err.line(), err.column())
}

fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k.to_lowercase(), fold_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}
