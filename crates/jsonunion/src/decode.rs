//! Discriminator-based decoding.
//!
//! A [`Decoder`] parses the text, inspects the top-level property names and
//! picks the first configured discriminator key that is present. The matched
//! document is then mapped onto the target shape by the engine.
//!
//! Outcomes fall into four groups:
//!
//! - `Ok(None)`: nothing to decode (blank text, JSON `null`, non-object top level).
//! - `Ok(Some(..))` with a matched variant.
//! - `Ok(Some(..))` with an error variant: no key matched, or malformed input
//!   under [`MalformedPolicy::Capture`].
//! - `Err(DecodeFault)`: blank keys, or malformed input under
//!   [`MalformedPolicy::Raise`].

use std::fmt;

use serde::de::DeserializeOwned;

use crate::engine::{JsonEngine, MapperOptions, SerdeJsonEngine};
use crate::error::{DecodeError, DecodeFault};
use crate::outcome::{DecodeOutcome, DecodeOutcome2, Selection};
use crate::properties::properties;

/// What to do when the text does not parse or the matched shape does not map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Return `Err(DecodeFault::Malformed)`.
    #[default]
    Raise,
    /// Return the failure as the outcome's error variant.
    Capture,
}

/// Per-decoder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions<O = MapperOptions> {
    pub policy: MalformedPolicy,
    /// Forwarded verbatim to the engine when mapping.
    pub mapper: O,
}

impl<O> DecodeOptions<O> {
    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_mapper(mut self, mapper: O) -> Self {
        self.mapper = mapper;
        self
    }

    /// Shorthand for [`MalformedPolicy::Capture`].
    pub fn lenient(self) -> Self {
        self.with_policy(MalformedPolicy::Capture)
    }
}

/// Stateless decoder over a [`JsonEngine`].
///
/// Every call is independent, so one decoder can be shared across threads.
pub struct Decoder<E: JsonEngine = SerdeJsonEngine> {
    engine: E,
    options: DecodeOptions<E::Options>,
}

/// Internal scan result before the malformed policy is applied.
enum Resolution<D> {
    Absent,
    Matched { index: usize, document: D },
    Failed(DecodeError),
}

impl Decoder<SerdeJsonEngine> {
    pub fn new() -> Self {
        Decoder::with_engine(SerdeJsonEngine)
    }
}

impl Default for Decoder<SerdeJsonEngine> {
    fn default() -> Self {
        Decoder::new()
    }
}

impl<E: JsonEngine + Clone> Clone for Decoder<E>
where
    E::Options: Clone,
{
    fn clone(&self) -> Self {
        Decoder {
            engine: self.engine.clone(),
            options: self.options.clone(),
        }
    }
}

impl<E: JsonEngine + fmt::Debug> fmt::Debug for Decoder<E>
where
    E::Options: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("engine", &self.engine)
            .field("options", &self.options)
            .finish()
    }
}

impl<E: JsonEngine> Decoder<E> {
    pub fn with_engine(engine: E) -> Self {
        Decoder {
            engine,
            options: DecodeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DecodeOptions<E::Options>) -> Self {
        self.options = options;
        self
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.options.policy = policy;
        self
    }

    pub fn with_mapper(mut self, mapper: E::Options) -> Self {
        self.options.mapper = mapper;
        self
    }

    /// Capture malformed input as an error outcome instead of raising it.
    pub fn lenient(self) -> Self {
        self.with_policy(MalformedPolicy::Capture)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn options(&self) -> &DecodeOptions<E::Options> {
        &self.options
    }

    /// Decode `text` into `T` when `key` is a top-level property.
    pub fn decode<T>(&self, text: &str, key: &str) -> Result<Option<DecodeOutcome<T>>, DecodeFault>
    where
        T: DeserializeOwned,
    {
        let outcome = match self.resolve(text, &[key], |_| "key".to_owned())? {
            Resolution::Absent => return Ok(None),
            Resolution::Matched { document, .. } => match self.map_document(document) {
                Ok(value) => DecodeOutcome::Matched(value),
                Err(err) => DecodeOutcome::Error(self.settle(err)?),
            },
            Resolution::Failed(err) => DecodeOutcome::Error(self.settle(err)?),
        };
        Ok(Some(outcome))
    }

    /// Decode `text` into `A` when `first_key` is present, otherwise into `B`
    /// when `second_key` is present.
    ///
    /// A document carrying both keys always resolves to `A`.
    pub fn decode2<A, B>(
        &self,
        text: &str,
        first_key: &str,
        second_key: &str,
    ) -> Result<Option<DecodeOutcome2<A, B>>, DecodeFault>
    where
        A: DeserializeOwned,
        B: DeserializeOwned,
    {
        let resolution = self.resolve(text, &[first_key, second_key], |idx| {
            let name = if idx == 0 { "first_key" } else { "second_key" };
            name.to_owned()
        })?;

        let mapped = match resolution {
            Resolution::Absent => return Ok(None),
            Resolution::Matched { index: 0, document } => {
                self.map_document(document).map(DecodeOutcome2::First)
            }
            Resolution::Matched { document, .. } => {
                self.map_document(document).map(DecodeOutcome2::Second)
            }
            Resolution::Failed(err) => Err(err),
        };

        let outcome = match mapped {
            Ok(outcome) => outcome,
            Err(err) => DecodeOutcome2::Error(self.settle(err)?),
        };
        Ok(Some(outcome))
    }

    /// Select among any number of discriminators without mapping.
    ///
    /// Keys are tried in order; the first one present wins. The parsed
    /// document is handed back for the caller to map.
    pub fn select(
        &self,
        text: &str,
        keys: &[&str],
    ) -> Result<Option<Selection<E::Document>>, DecodeFault> {
        let selection = match self.resolve(text, keys, |idx| format!("keys[{idx}]"))? {
            Resolution::Absent => return Ok(None),
            Resolution::Matched { index, document } => Selection::Matched {
                index,
                key: keys[index].to_owned(),
                document,
            },
            Resolution::Failed(err) => Selection::Error(self.settle(err)?),
        };
        Ok(Some(selection))
    }

    /// Map a document returned by [`Decoder::select`] with this decoder's
    /// engine, mapper options and policy.
    pub fn map<T>(&self, document: E::Document) -> Result<DecodeOutcome<T>, DecodeFault>
    where
        T: DeserializeOwned,
    {
        match self.map_document(document) {
            Ok(value) => Ok(DecodeOutcome::Matched(value)),
            Err(err) => Ok(DecodeOutcome::Error(self.settle(err)?)),
        }
    }

    fn resolve(
        &self,
        text: &str,
        keys: &[&str],
        argument: fn(usize) -> String,
    ) -> Result<Resolution<E::Document>, DecodeFault> {
        if text.trim().is_empty() {
            tracing::trace!("blank input, nothing to decode");
            return Ok(Resolution::Absent);
        }

        if keys.is_empty() {
            return Err(DecodeFault::no_keys());
        }
        if let Some(idx) = keys.iter().position(|key| key.trim().is_empty()) {
            return Err(DecodeFault::blank_key(argument(idx)));
        }

        let document = match self.engine.parse(text) {
            Ok(document) => document,
            Err(failure) => {
                tracing::debug!(
                    category = %failure.category,
                    line = failure.line,
                    column = failure.column,
                    "input is not valid JSON"
                );
                return Ok(Resolution::Failed(DecodeError::malformed(failure)));
            }
        };

        if self.engine.is_null(&document) {
            tracing::trace!("input is JSON null, nothing to decode");
            return Ok(Resolution::Absent);
        }

        let Some(props) = properties(&self.engine, &document) else {
            tracing::trace!("top level is not an object, nothing to decode");
            return Ok(Resolution::Absent);
        };

        match keys.iter().position(|key| props.contains(key)) {
            Some(index) => {
                tracing::debug!(key = keys[index], index, "discriminator matched");
                Ok(Resolution::Matched { index, document })
            }
            None => {
                tracing::debug!(
                    keys = ?keys,
                    properties = props.len(),
                    "no discriminator matched"
                );
                Ok(Resolution::Failed(DecodeError::unmatched(text, keys)))
            }
        }
    }

    fn map_document<T: DeserializeOwned>(&self, document: E::Document) -> Result<T, DecodeError> {
        self.engine
            .map_to(document, &self.options.mapper)
            .map_err(|failure| {
                tracing::debug!(category = %failure.category, "matched shape failed to map");
                DecodeError::malformed(failure)
            })
    }

    /// Apply the malformed policy: raise malformed errors under `Raise`,
    /// pass everything else through as a value.
    fn settle(&self, err: DecodeError) -> Result<DecodeError, DecodeFault> {
        if err.is_malformed() && self.options.policy == MalformedPolicy::Raise {
            Err(DecodeFault::Malformed(err))
        } else {
            Ok(err)
        }
    }
}

/// [`Decoder::decode`] with default options.
pub fn decode<T: DeserializeOwned>(
    text: &str,
    key: &str,
) -> Result<Option<DecodeOutcome<T>>, DecodeFault> {
    Decoder::new().decode(text, key)
}

/// [`Decoder::decode2`] with default options.
pub fn decode2<A, B>(
    text: &str,
    first_key: &str,
    second_key: &str,
) -> Result<Option<DecodeOutcome2<A, B>>, DecodeFault>
where
    A: DeserializeOwned,
    B: DeserializeOwned,
{
    Decoder::new().decode2(text, first_key, second_key)
}
