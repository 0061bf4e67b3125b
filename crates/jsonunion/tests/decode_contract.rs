//! Contract tests for the discriminator decoder.
//!
//! Covers the absence, match, tie-break, unmatched and malformed paths for
//! both failure policies, using the response shapes from the usage examples.

use jsonunion::{
    decode, decode2, DecodeErrorKind, DecodeFault, DecodeOutcome2, Decoder, JsonEngine,
    Malformed, MalformedCategory, SerdeJsonEngine,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Deserialize, PartialEq)]
struct ResponseOk {
    prop1: i64,
    prop2: Option<String>,
    prop3: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct ResponseAlt {
    message: Option<String>,
    code: i64,
}

type Outcome = DecodeOutcome2<ResponseOk, ResponseAlt>;

fn strict(text: &str) -> Result<Option<Outcome>, DecodeFault> {
    decode2(text, "prop1", "message")
}

fn lenient(text: &str) -> Result<Option<Outcome>, DecodeFault> {
    Decoder::new().lenient().decode2(text, "prop1", "message")
}

// ──────────────────────────────────────────────
// Matching
// ──────────────────────────────────────────────

#[test]
fn first_shape_scenario() {
    let outcome = strict(r#"{"prop1":10,"prop2":"n1"}"#).unwrap().unwrap();
    assert!(outcome.is_first());
    assert!(!outcome.is_second());
    assert!(!outcome.is_error());
    assert_eq!(
        outcome.into_first().unwrap(),
        ResponseOk {
            prop1: 10,
            prop2: Some("n1".to_string()),
            prop3: None,
        }
    );
}

#[test]
fn second_shape_scenario() {
    let outcome = strict(r#"{"message":"x","code":100}"#).unwrap().unwrap();
    assert!(outcome.is_second());
    assert!(!outcome.is_first());
    assert!(!outcome.is_error());
    assert_eq!(
        outcome.into_second().unwrap(),
        ResponseAlt {
            message: Some("x".to_string()),
            code: 100,
        }
    );
}

#[test]
fn both_keys_resolve_to_first_listed_regardless_of_order() {
    #[derive(Debug, Deserialize)]
    struct Loose {
        #[serde(default)]
        code: i64,
    }

    for text in [
        r#"{"prop1": 1, "message": "m", "code": 2}"#,
        r#"{"message": "m", "code": 2, "prop1": 1}"#,
    ] {
        let outcome: DecodeOutcome2<Loose, Loose> =
            decode2(text, "prop1", "message").unwrap().unwrap();
        assert!(outcome.is_first(), "text {text} should resolve to first");

        let swapped: DecodeOutcome2<Loose, Loose> =
            decode2(text, "message", "prop1").unwrap().unwrap();
        assert!(swapped.is_first(), "text {text} should resolve to first");
        assert_eq!(swapped.first().unwrap().code, 2);
    }
}

#[test]
fn discriminator_lookup_ignores_case() {
    let outcome = decode::<Value>(r#"{"Prop1": 10}"#, "prop1").unwrap().unwrap();
    assert_eq!(outcome.matched().unwrap()["Prop1"], 10);

    // Without key folding the shape itself still maps case-sensitively.
    assert!(matches!(
        strict(r#"{"Prop1": 10}"#),
        Err(DecodeFault::Malformed(_))
    ));
}

#[test]
fn case_insensitive_match_maps_with_folding() {
    let decoder = Decoder::new().with_mapper(
        jsonunion::MapperOptions::default().with_key_folding(jsonunion::KeyFolding::Lowercase),
    );
    let outcome: Outcome = decoder
        .decode2(r#"{"Prop1": 10, "PROP2": "n1"}"#, "prop1", "message")
        .unwrap()
        .unwrap();
    assert_eq!(outcome.first().unwrap().prop2.as_deref(), Some("n1"));
}

// ──────────────────────────────────────────────
// Absence
// ──────────────────────────────────────────────

#[test]
fn blank_text_is_absent() {
    for text in ["", " ", "\n\t  \r\n"] {
        assert_eq!(strict(text).unwrap(), None);
        assert_eq!(lenient(text).unwrap(), None);
        assert_eq!(decode::<Value>(text, "prop1").unwrap(), None);
    }
}

#[test]
fn json_null_and_non_objects_are_absent() {
    for text in ["null", " null ", "[1, 2, 3]", r#"[{"prop1": 1}]"#, "42", r#""prop1""#, "true"] {
        assert_eq!(strict(text).unwrap(), None, "text {text}");
        assert_eq!(lenient(text).unwrap(), None, "text {text}");
    }
}

// ──────────────────────────────────────────────
// Unmatched
// ──────────────────────────────────────────────

#[test]
fn unmatched_is_returned_for_both_policies() {
    let text = r#"{"other":1}"#;
    for outcome in [strict(text), lenient(text)] {
        let outcome = outcome.unwrap().unwrap();
        assert!(!outcome.is_first());
        assert!(!outcome.is_second());
        let err = outcome.into_error().unwrap();
        assert_eq!(err.kind, DecodeErrorKind::Unmatched);
        assert!(err.message.contains(text));
    }
}

#[test]
fn empty_object_is_unmatched() {
    let outcome = strict("{}").unwrap().unwrap();
    assert!(outcome.error().unwrap().is_unmatched());
}

// ──────────────────────────────────────────────
// Malformed
// ──────────────────────────────────────────────

#[test]
fn invalid_json_raises_by_default() {
    for text in [r#"{"prop1": }"#, "{", "not json", r#"{"prop1": 1} trailing"#] {
        match strict(text) {
            Err(DecodeFault::Malformed(err)) => {
                assert_eq!(err.kind, DecodeErrorKind::Malformed);
                assert!(err.category.is_some());
            }
            other => panic!("expected Malformed fault for {text}, got {other:?}"),
        }
    }
}

#[test]
fn invalid_json_captured_when_lenient() {
    let outcome = lenient(r#"{"prop1": }"#).unwrap().unwrap();
    let err = outcome.error().unwrap();
    assert!(err.is_malformed());
    assert_eq!(err.category, Some(MalformedCategory::Syntax));
}

#[test]
fn truncated_json_is_eof() {
    let outcome = lenient(r#"{"prop1": 10"#).unwrap().unwrap();
    assert_eq!(outcome.error().unwrap().category, Some(MalformedCategory::Eof));
}

#[test]
fn shape_mismatch_follows_policy() {
    let text = r#"{"message": "x", "code": "not a number"}"#;
    assert!(matches!(strict(text), Err(DecodeFault::Malformed(_))));

    let outcome = lenient(text).unwrap().unwrap();
    assert_eq!(outcome.error().unwrap().category, Some(MalformedCategory::Shape));
}

// ──────────────────────────────────────────────
// Invalid arguments
// ──────────────────────────────────────────────

#[test]
fn blank_keys_are_invalid_arguments_for_both_policies() {
    let text = r#"{"prop1": 1}"#;
    let strict_err = decode2::<ResponseOk, ResponseAlt>(text, "", "message").unwrap_err();
    let lenient_err = Decoder::new()
        .lenient()
        .decode2::<ResponseOk, ResponseAlt>(text, "prop1", "  ")
        .unwrap_err();
    assert!(strict_err.is_invalid_argument());
    assert!(lenient_err.is_invalid_argument());
}

#[test]
fn blank_key_checked_before_parsing() {
    let err = decode::<Value>("this is not json", "").unwrap_err();
    assert!(err.is_invalid_argument());
}

// ──────────────────────────────────────────────
// Engine seam and concurrency
// ──────────────────────────────────────────────

/// Engine that only accepts documents wrapped in an `{"envelope": ...}` object.
#[derive(Debug, Clone, Copy, Default)]
struct EnvelopeEngine;

impl JsonEngine for EnvelopeEngine {
    type Document = Value;
    type Options = ();

    fn parse(&self, text: &str) -> Result<Value, Malformed> {
        let mut outer = SerdeJsonEngine.parse(text)?;
        match outer.get_mut("envelope") {
            Some(inner) => Ok(inner.take()),
            None => Err(Malformed::new(MalformedCategory::Shape, "missing envelope")),
        }
    }

    fn is_null(&self, document: &Value) -> bool {
        document.is_null()
    }

    fn top_level_keys<'d>(&self, document: &'d Value) -> Option<Vec<&'d str>> {
        SerdeJsonEngine.top_level_keys(document)
    }

    fn map_to<T: serde::de::DeserializeOwned>(
        &self,
        document: Value,
        _options: &(),
    ) -> Result<T, Malformed> {
        SerdeJsonEngine.map_to(document, &Default::default())
    }
}

#[test]
fn custom_engine_drives_the_same_algorithm() {
    let decoder = Decoder::with_engine(EnvelopeEngine).lenient();

    let outcome: Outcome = decoder
        .decode2(r#"{"envelope": {"message": "x", "code": 7}}"#, "prop1", "message")
        .unwrap()
        .unwrap();
    assert_eq!(outcome.second().unwrap().code, 7);

    let absent: Option<Outcome> = decoder
        .decode2(r#"{"envelope": null}"#, "prop1", "message")
        .unwrap();
    assert!(absent.is_none());

    let missing: Outcome = decoder
        .decode2(r#"{"prop1": 1}"#, "prop1", "message")
        .unwrap()
        .unwrap();
    assert_eq!(missing.error().unwrap().category, Some(MalformedCategory::Shape));
}

#[test]
fn decoder_is_shareable_across_threads() {
    let decoder = Arc::new(Decoder::new().lenient());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let decoder = Arc::clone(&decoder);
            thread::spawn(move || {
                let text = if i % 2 == 0 {
                    format!(r#"{{"prop1": {i}}}"#)
                } else {
                    format!(r#"{{"message": "m{i}", "code": {i}}}"#)
                };
                let outcome: Outcome = decoder.decode2(&text, "prop1", "message").unwrap().unwrap();
                (i, outcome.index())
            })
        })
        .collect();

    for handle in handles {
        let (i, index) = handle.join().unwrap();
        assert_eq!(index, Some(i % 2));
    }
}
