//! Error types for JSON parsing and encoding.

use std::fmt::Display;
use thiserror::Error;

/// Errors that can occur while parsing or encoding JSON text.
///
/// Parse-time variants carry the character offset (counted in Unicode scalar
/// values, not bytes) at which the problem was detected.
#[derive(Error, Debug)]
pub enum JsonError {
    /// Missing or misplaced container delimiters, a wrong terminator for the
    /// sequence kind, or a non-string object key.
    #[error("structural error at offset {offset}: {message}")]
    Structural { offset: usize, message: String },

    /// A malformed escape sequence or an unterminated string.
    #[error("lexical error at offset {offset}: {message}")]
    Lexical { offset: usize, message: String },

    /// An invalid Unicode code point, found either while decoding a parsed
    /// string or while escaping UTF-16 input for output.
    #[error("encoding error at offset {offset}: {message}")]
    Encoding { offset: usize, message: String },

    /// Literal text that is neither a keyword nor a valid number.
    #[error("numeric format error at offset {offset}: {message}")]
    NumericFormat { offset: usize, message: String },

    /// The encoder was handed a value it cannot represent.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// Reading the input stream or writing the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JsonError {
    /// Character offset of a parse-time error, `None` for encoder and I/O errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            JsonError::Structural { offset, .. }
            | JsonError::Lexical { offset, .. }
            | JsonError::Encoding { offset, .. }
            | JsonError::NumericFormat { offset, .. } => Some(*offset),
            JsonError::UnsupportedValue(_) | JsonError::Io(_) => None,
        }
    }

    /// True for errors tied to a position in text (everything except
    /// unsupported values and I/O failures).
    pub fn is_parse_error(&self) -> bool {
        self.offset().is_some()
    }
}

impl serde::ser::Error for JsonError {
    fn custom<T: Display>(msg: T) -> Self {
        JsonError::UnsupportedValue(msg.to_string())
    }
}

/// Convenience alias used throughout jsonkit-core.
pub type Result<T> = std::result::Result<T, JsonError>;
