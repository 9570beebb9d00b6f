//! Single-pass JSON parser.
//!
//! Lexing and structural parsing happen in one forward scan. The scanner jumps
//! from one structural character (`[ ] { } " : , \`) to the next with
//! [`find_structural`]; whatever lies between two jumps is either literal text
//! (`true`, `12.5`, ...) or string body, depending on whether a string is open.
//!
//! Only array and object documents are accepted. A bare top-level scalar such
//! as `123` is rejected because no container start is found.
//!
//! # Key design decisions
//!
//! - **One cursor, no shared state**: the position of the last structural
//!   character lives in a `Parser` that exists only for one call, so
//!   concurrent parses never interact.
//! - **`Slot::Empty`**: an empty gap between two structural characters is
//!   reported as "no value", distinct from `null`. Array assembly drops empty
//!   slots in lenient mode and rejects them in strict mode; an object value is
//!   never allowed to be empty.
//! - **Keys cannot be containers**: keys are parsed with container creation
//!   disabled and must come back as strings.
//! - **Depth guard**: array/object parsing recurses, so nesting is capped by
//!   [`ParseOptions::max_depth`] instead of by the thread's stack.
//! - **Offsets are characters**: error positions are converted from byte
//!   indices to Unicode scalar counts only when an error is built.

use std::io::Read;

use crate::error::{JsonError, Result};
use crate::factory::{ContainerFactory, ValueFactory};
use crate::options::ParseOptions;
use crate::scan::{find_structural, is_json_whitespace, trim_json_whitespace};
use crate::value::{Scalar, Value};

/// Parse a JSON array or object document into a [`Value`] tree.
///
/// ```
/// use jsonkit_core::{parse, Value};
///
/// let value = parse(r#"{"name": "Alice", "scores": [95, 87.5]}"#).unwrap();
/// assert_eq!(value.get("name"), Some(&Value::from("Alice")));
/// assert!(parse("123").is_err());
/// ```
pub fn parse(text: &str) -> Result<Value> {
    parse_with(text, &ValueFactory, &ParseOptions::default())
}

/// Parse with a caller-supplied container factory and options.
pub fn parse_with<F: ContainerFactory>(
    text: &str,
    factory: &F,
    options: &ParseOptions,
) -> Result<F::Value> {
    let result = Parser::new(text, factory, options).parse_document();
    if let Err(err) = &result {
        tracing::debug!(error = %err, "JSON parse failed");
    }
    result
}

/// Drain `reader` into memory, then parse it as a document.
///
/// Read failures and input that is not valid UTF-8 surface as
/// [`JsonError::Io`].
pub fn parse_reader<R: Read>(reader: R) -> Result<Value> {
    parse_reader_with(reader, &ValueFactory, &ParseOptions::default())
}

/// [`parse_reader`] with a caller-supplied factory and options.
pub fn parse_reader_with<R: Read, F: ContainerFactory>(
    mut reader: R,
    factory: &F,
    options: &ParseOptions,
) -> Result<F::Value> {
    let mut text = String::with_capacity(512);
    reader.read_to_string(&mut text)?;
    tracing::debug!(bytes = text.len(), "read JSON input stream");
    parse_with(&text, factory, options)
}

/// Decode a single quoted JSON string literal such as `"a\tb"`.
///
/// JSON whitespace around the literal is allowed; anything else is an error.
pub fn decode_string(text: &str) -> Result<String> {
    let options = ParseOptions::default();
    Parser::new(text, &ValueFactory, &options).parse_string_literal()
}

/// Result of parsing one value position.
enum Slot<V> {
    /// Nothing between the two structural characters.
    Empty,
    /// A quoted string. Kept apart from other values because object keys
    /// must be strings.
    Text(String),
    Value(V),
}

struct Parser<'a, F> {
    text: &'a str,
    bytes: &'a [u8],
    factory: &'a F,
    options: &'a ParseOptions,
    /// Byte index of the structural character found most recently.
    last: usize,
    depth: usize,
}

impl<'a, F: ContainerFactory> Parser<'a, F> {
    fn new(text: &'a str, factory: &'a F, options: &'a ParseOptions) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            factory,
            options,
            last: 0,
            depth: 0,
        }
    }

    /// Locate the root container, parse it, and reject anything around it
    /// other than whitespace.
    fn parse_document(&mut self) -> Result<F::Value> {
        let Some(start) = find_structural(self.bytes, 0) else {
            return Err(self.structural(0, "missing JSON container sequence"));
        };
        if let Some(stray) = self.first_non_whitespace(0, start) {
            return Err(self.structural(
                stray,
                "extraneous characters before start of container sequence",
            ));
        }

        self.last = start;
        let root = match self.bytes[start] {
            b'[' => self.parse_array()?,
            b'{' => self.parse_object()?,
            _ => {
                return Err(self.structural(
                    start,
                    "extraneous characters before start of container sequence",
                ))
            }
        };

        if let Some(stray) = self.first_non_whitespace(self.last + 1, self.bytes.len()) {
            return Err(self.structural(
                stray,
                "extraneous characters after end of container sequence",
            ));
        }
        Ok(root)
    }

    fn parse_string_literal(&mut self) -> Result<String> {
        let Some(open) = self.first_non_whitespace(0, self.bytes.len()) else {
            return Err(self.lexical(0, "missing string literal"));
        };
        if self.bytes[open] != b'"' {
            return Err(self.lexical(open, "expected '\"' at start of string literal"));
        }
        let decoded = self.scan_string(open)?;
        if let Some(stray) = self.first_non_whitespace(self.last + 1, self.bytes.len()) {
            return Err(self.structural(
                stray,
                "extraneous characters after end of string literal",
            ));
        }
        Ok(decoded)
    }

    /// Parse array elements; `self.last` points at the opening `[`.
    fn parse_array(&mut self) -> Result<F::Value> {
        self.enter()?;
        let mut list = self.factory.create_list();
        let mut first = true;
        loop {
            let slot = self.parse_value(true)?;
            let terminator = self.bytes[self.last];
            match slot {
                Slot::Empty => {
                    let closes_empty_array = first && terminator == b']';
                    if self.options.strict && !closes_empty_array {
                        return Err(self.structural(self.last, "empty array element"));
                    }
                }
                Slot::Text(s) => {
                    let value = self.factory.scalar(Scalar::Text(s));
                    self.factory.push(&mut list, value);
                }
                Slot::Value(value) => self.factory.push(&mut list, value),
            }
            first = false;

            match terminator {
                b']' => break,
                b'}' => {
                    return Err(self.structural(self.last, "illegal array sequence termination"))
                }
                b':' => return Err(self.structural(self.last, "unexpected ':' in array")),
                _ => {}
            }
        }
        self.depth -= 1;
        Ok(self.factory.finish_list(list))
    }

    /// Parse `key: value` pairs; `self.last` points at the opening `{`.
    fn parse_object(&mut self) -> Result<F::Value> {
        self.enter()?;
        let mut map = self.factory.create_map();
        let mut first = true;
        loop {
            let key_start = self.last + 1;
            let key = match self.parse_value(false)? {
                Slot::Text(key) => key,
                Slot::Empty if self.bytes[self.last] == b'}' => {
                    if self.options.strict && !first {
                        return Err(self.structural(self.last, "trailing comma in object"));
                    }
                    break;
                }
                _ => return Err(self.structural(key_start, "invalid object sequence key")),
            };
            if self.bytes[self.last] != b':' {
                return Err(self.structural(self.last, "expected ':' after object key"));
            }

            let value = match self.parse_value(true)? {
                Slot::Empty => return Err(self.structural(self.last, "missing object value")),
                Slot::Text(s) => self.factory.scalar(Scalar::Text(s)),
                Slot::Value(value) => value,
            };
            self.factory.insert(&mut map, key, value);
            first = false;

            match self.bytes[self.last] {
                b'}' => break,
                b']' => {
                    return Err(self.structural(self.last, "illegal object sequence termination"))
                }
                b':' => return Err(self.structural(self.last, "unexpected ':' in object")),
                _ => {}
            }
        }
        self.depth -= 1;
        Ok(self.factory.finish_map(map))
    }

    /// Parse one value position, stopping at the `,` `:` `]` or `}` that ends
    /// it. On return `self.last` points at that terminator.
    ///
    /// With `allow_containers` unset (object keys), a nested container or a
    /// bare literal is an error.
    fn parse_value(&mut self, allow_containers: bool) -> Result<Slot<F::Value>> {
        let text = self.text;
        let value_start = self.last + 1;
        let mut cursor = value_start;
        let mut literal = "";
        let mut literal_at = value_start;
        let mut parsed: Option<Slot<F::Value>> = None;

        loop {
            let Some(pos) = find_structural(self.bytes, cursor) else {
                return Err(self.structural(value_start, "end of data while parsing value"));
            };
            self.last = pos;

            let gap = &text[cursor..pos];
            let trimmed = trim_json_whitespace(gap);
            if !trimmed.is_empty() {
                let at = cursor + gap.len() - gap.trim_start_matches(is_json_whitespace).len();
                if parsed.is_some() {
                    return Err(self.structural(at, "extraneous characters after end of data value"));
                }
                literal = trimmed;
                literal_at = at;
            }

            match self.bytes[pos] {
                b',' | b':' | b']' | b'}' => break,
                b'"' => {
                    if !literal.is_empty() || parsed.is_some() {
                        return Err(self.structural(pos, "illegal string start"));
                    }
                    parsed = Some(Slot::Text(self.scan_string(pos)?));
                }
                open @ (b'[' | b'{') => {
                    if !literal.is_empty() || parsed.is_some() {
                        let kind = if open == b'[' { "array" } else { "object" };
                        return Err(self.structural(pos, format!("illegal {kind} sequence start")));
                    }
                    if !allow_containers {
                        return Err(self.structural(pos, "invalid object key"));
                    }
                    let container = if open == b'[' {
                        self.parse_array()?
                    } else {
                        self.parse_object()?
                    };
                    parsed = Some(Slot::Value(container));
                }
                _ => return Err(self.lexical(pos, "escape sequence outside of string")),
            }
            cursor = self.last + 1;
        }

        if let Some(slot) = parsed {
            return Ok(slot);
        }
        if literal.is_empty() {
            return Ok(Slot::Empty);
        }
        if !allow_containers {
            return Err(self.structural(literal_at, "invalid object sequence key"));
        }
        match resolve_literal(literal) {
            Some(scalar) => Ok(Slot::Value(self.factory.scalar(scalar))),
            None => Err(self.numeric(literal_at, format!("invalid numeric value '{literal}'"))),
        }
    }

    /// Read a string body; `open` is the index of the opening quote. On
    /// return `self.last` points at the closing quote.
    fn scan_string(&mut self, open: usize) -> Result<String> {
        let text = self.text;
        let mut buf = String::new();
        let mut cursor = open + 1;
        loop {
            let Some(pos) = find_structural(self.bytes, cursor) else {
                return Err(self.lexical(open, "unterminated string"));
            };
            buf.push_str(&text[cursor..pos]);
            match self.bytes[pos] {
                b'"' => {
                    self.last = pos;
                    return Ok(buf);
                }
                b'\\' => cursor = self.unescape(pos, &mut buf)?,
                // Other structural characters are ordinary string content.
                other => {
                    buf.push(char::from(other));
                    cursor = pos + 1;
                }
            }
        }
    }

    /// Decode the escape starting at `backslash` into `buf`, returning the
    /// index just past it.
    fn unescape(&self, backslash: usize, buf: &mut String) -> Result<usize> {
        let at = backslash + 1;
        let Some(&code) = self.bytes.get(at) else {
            return Err(self.lexical(backslash, "unterminated string"));
        };
        let decoded = match code {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.unescape_unicode(backslash, buf),
            _ => {
                let shown = self.text[at..].chars().next().unwrap_or_default();
                return Err(self.lexical(
                    backslash,
                    format!("illegal string escape sequence '\\{shown}'"),
                ));
            }
        };
        buf.push(decoded);
        Ok(at + 1)
    }

    /// Decode a `\uXXXX` escape, pairing a high surrogate with the `\uXXXX`
    /// low surrogate that must follow it.
    fn unescape_unicode(&self, backslash: usize, buf: &mut String) -> Result<usize> {
        let unit = self.hex_unit(backslash)?;
        let mut next = backslash + 6;
        let code_point = match unit {
            0xD800..=0xDBFF => {
                let paired = self.bytes.get(next) == Some(&b'\\')
                    && self.bytes.get(next + 1) == Some(&b'u');
                if !paired {
                    return Err(self.encoding(
                        backslash,
                        "invalid Unicode character: unpaired high surrogate",
                    ));
                }
                let low = self.hex_unit(next)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.encoding(
                        backslash,
                        "invalid Unicode character: high surrogate without low surrogate",
                    ));
                }
                next += 6;
                0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(self.encoding(
                    backslash,
                    "invalid Unicode character: unpaired low surrogate",
                ))
            }
            _ => u32::from(unit),
        };
        let ch = char::from_u32(code_point)
            .ok_or_else(|| self.encoding(backslash, "invalid Unicode character"))?;
        buf.push(ch);
        Ok(next)
    }

    /// The four hex digits following the `\u` at `backslash`.
    fn hex_unit(&self, backslash: usize) -> Result<u16> {
        let start = backslash + 2;
        let end = start + 4;
        if end > self.bytes.len() {
            return Err(self.lexical(backslash, "truncated unicode escape"));
        }
        std::str::from_utf8(&self.bytes[start..end])
            .ok()
            .filter(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|digits| u16::from_str_radix(digits, 16).ok())
            .ok_or_else(|| self.lexical(backslash, "invalid unicode escape"))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.structural(self.last, "maximum nesting depth exceeded"));
        }
        Ok(())
    }

    /// Byte index of the first non-whitespace character in `from..to`.
    fn first_non_whitespace(&self, from: usize, to: usize) -> Option<usize> {
        self.text[from..to]
            .char_indices()
            .find(|&(_, c)| !is_json_whitespace(c))
            .map(|(i, _)| from + i)
    }

    fn char_offset(&self, byte: usize) -> usize {
        let byte = byte.min(self.text.len());
        self.text
            .get(..byte)
            .map_or(byte, |prefix| prefix.chars().count())
    }

    fn structural(&self, at: usize, message: impl Into<String>) -> JsonError {
        JsonError::Structural {
            offset: self.char_offset(at),
            message: message.into(),
        }
    }

    fn lexical(&self, at: usize, message: impl Into<String>) -> JsonError {
        JsonError::Lexical {
            offset: self.char_offset(at),
            message: message.into(),
        }
    }

    fn encoding(&self, at: usize, message: impl Into<String>) -> JsonError {
        JsonError::Encoding {
            offset: self.char_offset(at),
            message: message.into(),
        }
    }

    fn numeric(&self, at: usize, message: impl Into<String>) -> JsonError {
        JsonError::NumericFormat {
            offset: self.char_offset(at),
            message: message.into(),
        }
    }
}

/// Resolve bare literal text.
///
/// Keywords match case-insensitively. Text without a `.` is tried as `i64`
/// first, so `12` stays an integer while `12.0` and `1e3` become floats and
/// integers too large for `i64` fall back to `f64`. Non-finite results are
/// rejected since JSON cannot express them.
///
/// Numbers follow Rust's `i64`/`f64` grammar rather than strict JSON, so a
/// leading `+`, leading zeros, and a bare `.5` or `5.` are all accepted and
/// come back normalized (`+5` → `5`, `01` → `1`, `.5` → `0.5`, `5.` → `5.0`).
fn resolve_literal(literal: &str) -> Option<Scalar> {
    if literal.eq_ignore_ascii_case("null") {
        return Some(Scalar::Null);
    }
    if literal.eq_ignore_ascii_case("true") {
        return Some(Scalar::Bool(true));
    }
    if literal.eq_ignore_ascii_case("false") {
        return Some(Scalar::Bool(false));
    }
    if !literal.contains('.') {
        if let Ok(n) = literal.parse::<i64>() {
            return Some(Scalar::Integer(n));
        }
    }
    literal
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Scalar::Float)
}
