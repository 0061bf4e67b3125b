//! Tagged results produced by the decoder.
//!
//! Each outcome holds exactly one variant. Dispatch is a plain `match` or the
//! total [`fold`](DecodeOutcome2::fold) helpers; accessors return `Option`
//! rather than failing on an inactive variant.

use crate::error::DecodeError;

// ── Single candidate ────────────────────────────────────────────────

/// Result of decoding against one discriminator.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome<T> {
    Matched(T),
    Error(DecodeError),
}

impl<T> DecodeOutcome<T> {
    pub fn is_matched(&self) -> bool {
        matches!(self, DecodeOutcome::Matched(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DecodeOutcome::Error(_))
    }

    pub fn matched(&self) -> Option<&T> {
        match self {
            DecodeOutcome::Matched(value) => Some(value),
            DecodeOutcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&DecodeError> {
        match self {
            DecodeOutcome::Matched(_) => None,
            DecodeOutcome::Error(err) => Some(err),
        }
    }

    /// Consume the outcome with one handler per variant.
    pub fn fold<R>(
        self,
        on_matched: impl FnOnce(T) -> R,
        on_error: impl FnOnce(DecodeError) -> R,
    ) -> R {
        match self {
            DecodeOutcome::Matched(value) => on_matched(value),
            DecodeOutcome::Error(err) => on_error(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DecodeOutcome<U> {
        match self {
            DecodeOutcome::Matched(value) => DecodeOutcome::Matched(f(value)),
            DecodeOutcome::Error(err) => DecodeOutcome::Error(err),
        }
    }

    pub fn into_result(self) -> Result<T, DecodeError> {
        self.into()
    }
}

impl<T> From<DecodeOutcome<T>> for Result<T, DecodeError> {
    fn from(outcome: DecodeOutcome<T>) -> Self {
        match outcome {
            DecodeOutcome::Matched(value) => Ok(value),
            DecodeOutcome::Error(err) => Err(err),
        }
    }
}

// ── Two candidates ──────────────────────────────────────────────────

/// Result of decoding against two discriminators, first-listed winning ties.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome2<A, B> {
    First(A),
    Second(B),
    Error(DecodeError),
}

impl<A, B> DecodeOutcome2<A, B> {
    pub fn is_first(&self) -> bool {
        matches!(self, DecodeOutcome2::First(_))
    }

    pub fn is_second(&self) -> bool {
        matches!(self, DecodeOutcome2::Second(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DecodeOutcome2::Error(_))
    }

    pub fn first(&self) -> Option<&A> {
        match self {
            DecodeOutcome2::First(value) => Some(value),
            _ => None,
        }
    }

    pub fn second(&self) -> Option<&B> {
        match self {
            DecodeOutcome2::Second(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DecodeError> {
        match self {
            DecodeOutcome2::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn into_first(self) -> Option<A> {
        match self {
            DecodeOutcome2::First(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_second(self) -> Option<B> {
        match self {
            DecodeOutcome2::Second(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_error(self) -> Option<DecodeError> {
        match self {
            DecodeOutcome2::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Zero-based position of the matched candidate; `None` for errors.
    pub fn index(&self) -> Option<usize> {
        match self {
            DecodeOutcome2::First(_) => Some(0),
            DecodeOutcome2::Second(_) => Some(1),
            DecodeOutcome2::Error(_) => None,
        }
    }

    /// Consume the outcome with one handler per variant.
    pub fn fold<R>(
        self,
        on_first: impl FnOnce(A) -> R,
        on_second: impl FnOnce(B) -> R,
        on_error: impl FnOnce(DecodeError) -> R,
    ) -> R {
        match self {
            DecodeOutcome2::First(value) => on_first(value),
            DecodeOutcome2::Second(value) => on_second(value),
            DecodeOutcome2::Error(err) => on_error(err),
        }
    }

    pub fn map_first<U>(self, f: impl FnOnce(A) -> U) -> DecodeOutcome2<U, B> {
        match self {
            DecodeOutcome2::First(value) => DecodeOutcome2::First(f(value)),
            DecodeOutcome2::Second(value) => DecodeOutcome2::Second(value),
            DecodeOutcome2::Error(err) => DecodeOutcome2::Error(err),
        }
    }

    pub fn map_second<U>(self, f: impl FnOnce(B) -> U) -> DecodeOutcome2<A, U> {
        match self {
            DecodeOutcome2::First(value) => DecodeOutcome2::First(value),
            DecodeOutcome2::Second(value) => DecodeOutcome2::Second(f(value)),
            DecodeOutcome2::Error(err) => DecodeOutcome2::Error(err),
        }
    }
}

// ── Ordered selection ───────────────────────────────────────────────

/// Result of an untyped selection over any number of discriminators.
///
/// Carries the parsed document so the caller can map it onto whichever
/// shape belongs to `index`.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<D> {
    Matched {
        /// Position of the winning key in the supplied list.
        index: usize,
        /// The winning key as supplied by the caller.
        key: String,
        document: D,
    },
    Error(DecodeError),
}

impl<D> Selection<D> {
    pub fn is_matched(&self) -> bool {
        matches!(self, Selection::Matched { .. })
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Selection::Matched { index, .. } => Some(*index),
            Selection::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&DecodeError> {
        match self {
            Selection::Matched { .. } => None,
            Selection::Error(err) => Some(err),
        }
    }
}
