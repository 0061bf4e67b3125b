//! jsonunion: decode heterogeneous JSON into tagged unions.
//!
//! A caller that receives one of several JSON shapes (a success payload or
//! an error payload, two alternative schemas, ...) names one discriminator
//! property per shape. The decoder checks which of those properties is
//! present at the top level of the document, case-insensitively, and maps
//! the document onto the matching shape.
//!
//! ```
//! use jsonunion::{decode2, DecodeOutcome2};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Success { prop1: i64 }
//! #[derive(Deserialize)]
//! struct Failure { message: String }
//!
//! let text = r#"{"prop1": 10, "prop2": "n1"}"#;
//! match decode2::<Success, Failure>(text, "prop1", "message").unwrap() {
//!     Some(DecodeOutcome2::First(success)) => assert_eq!(success.prop1, 10),
//!     Some(DecodeOutcome2::Second(failure)) => panic!("{}", failure.message),
//!     Some(DecodeOutcome2::Error(err)) => panic!("{}", err),
//!     None => panic!("nothing to decode"),
//! }
//! ```
//!
//! Parsing and mapping go through the [`JsonEngine`] trait; [`SerdeJsonEngine`]
//! is the default.

pub mod decode;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod properties;

pub use decode::{decode, decode2, DecodeOptions, Decoder, MalformedPolicy};
pub use engine::{JsonEngine, KeyFolding, Malformed, MapperOptions, SerdeJsonEngine};
pub use error::{DecodeError, DecodeErrorKind, DecodeFault, MalformedCategory};
pub use outcome::{DecodeOutcome, DecodeOutcome2, Selection};
pub use properties::{properties, PropertySet};
