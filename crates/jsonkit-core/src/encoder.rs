//! JSON encoder: value tree to compact JSON text.
//!
//! Everything that can be encoded implements [`SelfDescribing`], which appends
//! the value's JSON text to an output buffer. [`Value`] implements it with an
//! exhaustive match over its variants; external types implement it to render
//! themselves, and the container impls (`Vec`, maps, `Option`, `Box<dyn _>`)
//! let such types sit anywhere inside a tree.
//!
//! Output rules:
//!
//! - **Floats** use the shortest text that round-trips and always carry a `.`
//!   or an exponent, so `1.0` re-parses as a float, not an integer. NaN and
//!   the infinities have no JSON form and are written as `null`.
//! - **Strings** escape `"`, `\`, `/`, C0 controls, U+007F–U+009F and the
//!   U+2000–U+20FF block. The common controls use their short forms (`\n`,
//!   `\t`, ...); the rest become `\u` plus four uppercase hex digits.
//!   Characters outside the BMP are written as-is.
//! - **Mappings** keep their iteration order; keys are escaped like strings.
//!
//! # Example
//! ```
//! use jsonkit_core::{encode, Mapping, Value};
//!
//! let mut map = Mapping::new();
//! map.insert("name", Value::from("Alice"));
//! map.insert("tags", Value::from(vec!["a/b", "tab\there"]));
//! let json = encode(&Value::Mapping(map)).unwrap();
//! assert_eq!(json, r#"{"name":"Alice","tags":["a\/b","tab\there"]}"#);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::BuildHasher;
use std::io::Write;

use crate::error::{JsonError, Result};
use crate::value::{Mapping, Value};

/// A type that can render itself as JSON text.
///
/// Implementations append exactly one JSON value to `out`. The encoder calls
/// this method instead of inspecting the value, so an implementation fully
/// controls its representation.
pub trait SelfDescribing {
    fn write_json(&self, out: &mut String) -> Result<()>;
}

/// Encode `value` as a compact JSON string.
pub fn encode<T: SelfDescribing + ?Sized>(value: &T) -> Result<String> {
    let mut out = String::with_capacity(128);
    value.write_json(&mut out)?;
    Ok(out)
}

/// Append the encoding of `value` to `out`.
///
/// On error, `out` may hold a partial encoding.
pub fn encode_into<T: SelfDescribing + ?Sized>(value: &T, out: &mut String) -> Result<()> {
    value.write_json(out)
}

/// Encode `value` completely, then write the text to `writer`.
///
/// Nothing is written if encoding fails.
pub fn encode_to_writer<T: SelfDescribing + ?Sized, W: Write>(value: &T, mut writer: W) -> Result<()> {
    let text = encode(value)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    tracing::debug!(bytes = text.len(), "wrote JSON output");
    Ok(())
}

/// Quote and escape `s` as a JSON string literal.
pub fn encode_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    write_string(s, &mut out);
    out
}

/// Append the escaped form of `s` (without quotes) to `out`.
///
/// Runs of characters that need no escaping are copied in one piece.
pub fn escape_str(s: &str, out: &mut String) {
    let mut run_start = 0;
    for (i, ch) in s.char_indices() {
        if !needs_escape(ch) {
            continue;
        }
        out.push_str(&s[run_start..i]);
        push_escape(ch, out);
        run_start = i + ch.len_utf8();
    }
    out.push_str(&s[run_start..]);
}

/// Append the escaped form of UTF-16 text (without quotes) to `out`.
///
/// Surrogate pairs are combined and written as one character. An unpaired
/// surrogate is a [`JsonError::Encoding`] whose offset is the index of the
/// offending code unit.
pub fn escape_utf16(units: &[u16], out: &mut String) -> Result<()> {
    let mut index = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(ch) => {
                if needs_escape(ch) {
                    push_escape(ch, out);
                } else {
                    out.push(ch);
                }
                index += ch.len_utf16();
            }
            Err(err) => {
                return Err(JsonError::Encoding {
                    offset: index,
                    message: format!(
                        "invalid Unicode character: unpaired surrogate {:#06X}",
                        err.unpaired_surrogate()
                    ),
                })
            }
        }
    }
    Ok(())
}

/// UTF-16 text that encodes as a JSON string.
///
/// Useful for strings obtained from UTF-16 sources, which may contain unpaired
/// surrogates that a Rust `str` cannot hold.
#[derive(Debug, Clone, Copy)]
pub struct Utf16Str<'a>(pub &'a [u16]);

impl SelfDescribing for Utf16Str<'_> {
    fn write_json(&self, out: &mut String) -> Result<()> {
        out.push('"');
        escape_utf16(self.0, out)?;
        out.push('"');
        Ok(())
    }
}

fn needs_escape(ch: char) -> bool {
    matches!(
        ch,
        '"' | '\\' | '/' | '\u{0}'..='\u{1f}' | '\u{7f}'..='\u{9f}' | '\u{2000}'..='\u{20ff}'
    )
}

fn push_escape(ch: char, out: &mut String) {
    match ch {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '/' => out.push_str("\\/"),
        '\u{8}' => out.push_str("\\b"),
        '\u{c}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        _ => out.push_str(&format!("\\u{:04X}", u32::from(ch))),
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    escape_str(s, out);
    out.push('"');
}

/// Debug formatting of `f32`/`f64` is the shortest round-trip text and keeps
/// a `.0` on integral values.
fn write_float<T: Debug>(value: T, finite: bool, out: &mut String) {
    if finite {
        out.push_str(&format!("{value:?}"));
    } else {
        out.push_str("null");
    }
}

fn write_list<T: SelfDescribing>(items: &[T], out: &mut String) -> Result<()> {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        item.write_json(out)?;
    }
    out.push(']');
    Ok(())
}

pub(crate) fn write_entries<'a, K, V, I>(entries: I, out: &mut String) -> Result<()>
where
    K: AsRef<str>,
    V: SelfDescribing + ?Sized + 'a,
    I: IntoIterator<Item = (K, &'a V)>,
{
    out.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_string(key.as_ref(), out);
        out.push(':');
        value.write_json(out)?;
    }
    out.push('}');
    Ok(())
}

impl SelfDescribing for Value {
    fn write_json(&self, out: &mut String) -> Result<()> {
        match self {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => b.write_json(out)?,
            Value::Integer(n) => out.push_str(&n.to_string()),
            Value::Float(f) => write_float(*f, f.is_finite(), out),
            Value::Text(s) => write_string(s, out),
            Value::List(items) => write_list(items, out)?,
            Value::Mapping(map) => map.write_json(out)?,
        }
        Ok(())
    }
}

impl SelfDescribing for Mapping {
    fn write_json(&self, out: &mut String) -> Result<()> {
        write_entries(self.iter(), out)
    }
}

impl SelfDescribing for bool {
    fn write_json(&self, out: &mut String) -> Result<()> {
        out.push_str(if *self { "true" } else { "false" });
        Ok(())
    }
}

macro_rules! self_describing_integer {
    ($($ty:ty),*) => {
        $(
            impl SelfDescribing for $ty {
                fn write_json(&self, out: &mut String) -> Result<()> {
                    out.push_str(&self.to_string());
                    Ok(())
                }
            }
        )*
    };
}

self_describing_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl SelfDescribing for f32 {
    fn write_json(&self, out: &mut String) -> Result<()> {
        write_float(*self, self.is_finite(), out);
        Ok(())
    }
}

impl SelfDescribing for f64 {
    fn write_json(&self, out: &mut String) -> Result<()> {
        write_float(*self, self.is_finite(), out);
        Ok(())
    }
}

impl SelfDescribing for str {
    fn write_json(&self, out: &mut String) -> Result<()> {
        write_string(self, out);
        Ok(())
    }
}

impl SelfDescribing for String {
    fn write_json(&self, out: &mut String) -> Result<()> {
        write_string(self, out);
        Ok(())
    }
}

impl SelfDescribing for char {
    fn write_json(&self, out: &mut String) -> Result<()> {
        write_string(self.encode_utf8(&mut [0; 4]), out);
        Ok(())
    }
}

impl SelfDescribing for () {
    fn write_json(&self, out: &mut String) -> Result<()> {
        out.push_str("null");
        Ok(())
    }
}

impl<T: SelfDescribing> SelfDescribing for Option<T> {
    fn write_json(&self, out: &mut String) -> Result<()> {
        match self {
            Some(value) => value.write_json(out),
            None => {
                out.push_str("null");
                Ok(())
            }
        }
    }
}

impl<T: SelfDescribing> SelfDescribing for [T] {
    fn write_json(&self, out: &mut String) -> Result<()> {
        write_list(self, out)
    }
}

impl<T: SelfDescribing> SelfDescribing for Vec<T> {
    fn write_json(&self, out: &mut String) -> Result<()> {
        write_list(self, out)
    }
}

impl<T: SelfDescribing + ?Sized> SelfDescribing for &T {
    fn write_json(&self, out: &mut String) -> Result<()> {
        (**self).write_json(out)
    }
}

impl<T: SelfDescribing + ?Sized> SelfDescribing for Box<T> {
    fn write_json(&self, out: &mut String) -> Result<()> {
        (**self).write_json(out)
    }
}

impl<V: SelfDescribing> SelfDescribing for BTreeMap<String, V> {
    fn write_json(&self, out: &mut String) -> Result<()> {
        write_entries(self, out)
    }
}

/// Entries are written in the map's iteration order, which is unspecified.
impl<V: SelfDescribing, S: BuildHasher> SelfDescribing for HashMap<String, V, S> {
    fn write_json(&self, out: &mut String) -> Result<()> {
        write_entries(self, out)
    }
}
