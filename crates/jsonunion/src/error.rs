//! Error values produced while decoding.
//!
//! [`DecodeError`] is plain data carried inside an outcome. [`DecodeFault`]
//! is what escapes to the caller as `Err`: either a bad call configuration or
//! a malformed input raised under [`MalformedPolicy::Raise`](crate::MalformedPolicy).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::Malformed;

/// Classification of a parse or mapping failure reported by an engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MalformedCategory {
    /// The text is not syntactically valid JSON.
    Syntax,
    /// The text ended before a complete JSON value was read.
    Eof,
    /// The JSON was valid but did not fit the selected shape.
    Shape,
    /// The engine failed while reading its input.
    Io,
}

impl MalformedCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            MalformedCategory::Syntax => "syntax",
            MalformedCategory::Eof => "eof",
            MalformedCategory::Shape => "shape",
            MalformedCategory::Io => "io",
        }
    }
}

impl fmt::Display for MalformedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which kind of failure a [`DecodeError`] describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DecodeErrorKind {
    /// The text failed to parse, or the selected shape failed to map.
    Malformed,
    /// The document is a JSON object but none of the discriminator keys is present.
    Unmatched,
}

/// A decoding failure held as data.
///
/// Never wraps a live error object, so it can be cloned, compared, logged
/// and serialized freely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub message: String,
    /// Engine classification, present for malformed input only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<MalformedCategory>,
    /// The raw text that could not be matched, present for unmatched input only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl DecodeError {
    pub(crate) fn malformed(failure: Malformed) -> Self {
        DecodeError {
            kind: DecodeErrorKind::Malformed,
            message: failure.message,
            category: Some(failure.category),
            input: None,
        }
    }

    pub(crate) fn unmatched(text: &str, keys: &[&str]) -> Self {
        DecodeError {
            kind: DecodeErrorKind::Unmatched,
            message: format!(
                "no discriminator matched (expected one of: {}). Value: '{}'",
                keys.join(", "),
                text
            ),
            category: None,
            input: Some(text.to_owned()),
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.kind == DecodeErrorKind::Malformed
    }

    pub fn is_unmatched(&self) -> bool {
        self.kind == DecodeErrorKind::Unmatched
    }

    /// Render as a JSON object with every field present (null when absent).
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "category": self.category.map(MalformedCategory::as_str),
            "input":    self.input,
            "kind":     match self.kind {
                DecodeErrorKind::Malformed => "malformed",
                DecodeErrorKind::Unmatched => "unmatched",
            },
            "message":  self.message,
        })
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Some(category) => write!(f, "{} ({})", self.message, category),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Failures that are raised to the caller instead of returned as an outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeFault {
    /// The call itself was misconfigured, e.g. a blank discriminator key.
    /// Raised regardless of the malformed policy.
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// Malformed input raised under `MalformedPolicy::Raise`.
    #[error("malformed JSON input: {0}")]
    Malformed(DecodeError),
}

impl DecodeFault {
    pub(crate) fn blank_key(argument: impl Into<String>) -> Self {
        DecodeFault::InvalidArgument {
            argument: argument.into(),
            reason: "discriminator key must not be empty or whitespace".to_owned(),
        }
    }

    pub(crate) fn no_keys() -> Self {
        DecodeFault::InvalidArgument {
            argument: "keys".to_owned(),
            reason: "at least one discriminator key is required".to_owned(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DecodeFault::InvalidArgument { .. })
    }

    /// The captured error, when this fault is raised malformed input.
    pub fn as_decode_error(&self) -> Option<&DecodeError> {
        match self {
            DecodeFault::Malformed(error) => Some(error),
            DecodeFault::InvalidArgument { .. } => None,
        }
    }
}
