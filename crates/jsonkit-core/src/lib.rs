//! # jsonkit-core
//!
//! Pure-Rust JSON codec built around a **single-pass parser** and a small
//! dynamic value tree.
//!
//! The parser fuses lexing and structural parsing into one forward scan that
//! hops between structural characters. The encoder writes compact JSON text,
//! escaping strings and normalizing numbers that JSON cannot express.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonkit_core::{encode, parse, Value};
//!
//! let value = parse(r#"{"name": "Alice", "scores": [95, 87.5, null]}"#).unwrap();
//! assert_eq!(value.get("name").and_then(Value::as_str), Some("Alice"));
//!
//! let json = encode(&value).unwrap();
//! assert_eq!(json, r#"{"name":"Alice","scores":[95,87.5,null]}"#);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value` tree and the insertion-ordered `Mapping`
//! - [`parser`]: text → value (`parse`, `parse_with`, `parse_reader`, `decode_string`)
//! - [`encoder`]: value → text (`encode`, `encode_into`, `encode_to_writer`) and the
//!   `SelfDescribing` capability for external types
//! - [`factory`]: `ContainerFactory`, the hook for building other tree types
//! - [`scan`]: the structural-character finder that drives the parser
//! - [`options`]: `ParseOptions` (strict mode, nesting limit)
//! - [`ser`]: serde bridge (`to_value`, `encode_serialize`)
//! - [`interop`]: conversions with `serde_json::Value`
//! - [`error`]: error taxonomy for parse/encode failures

pub mod encoder;
pub mod error;
pub mod factory;
pub mod interop;
pub mod options;
pub mod parser;
pub mod scan;
pub mod ser;
pub mod value;

pub use encoder::{
    encode, encode_into, encode_string, encode_to_writer, escape_str, escape_utf16,
    SelfDescribing, Utf16Str,
};
pub use error::{JsonError, Result};
pub use factory::{ContainerFactory, ValueFactory};
pub use interop::SerdeJsonFactory;
pub use options::ParseOptions;
pub use parser::{decode_string, parse, parse_reader, parse_reader_with, parse_with};
pub use ser::{encode_serialize, to_value};
pub use value::{Mapping, Scalar, Value};
