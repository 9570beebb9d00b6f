//! Structural-character search.
//!
//! The parser drives every step off one question: where is the next
//! `[ ] { } " : , \` at or after the cursor? Every one of them is ASCII, so the
//! search runs over raw UTF-8 bytes and every index it returns is also a
//! `char` boundary.

/// Lookup table marking the structural bytes.
const STRUCTURAL: [bool; 256] = {
    let mut table = [false; 256];
    table[b'[' as usize] = true;
    table[b']' as usize] = true;
    table[b'{' as usize] = true;
    table[b'}' as usize] = true;
    table[b'"' as usize] = true;
    table[b':' as usize] = true;
    table[b',' as usize] = true;
    table[b'\\' as usize] = true;
    table
};

/// True if `byte` is one of the structural characters.
pub fn is_structural(byte: u8) -> bool {
    STRUCTURAL[byte as usize]
}

/// Index of the next structural byte at or after `from`, or `None` when the
/// rest of the input holds none. A `from` past the end yields `None`.
///
/// ```
/// use jsonkit_core::scan::find_structural;
///
/// let text = br#"  [12, "a"]"#;
/// assert_eq!(find_structural(text, 0), Some(2));
/// assert_eq!(find_structural(text, 3), Some(5));
/// assert_eq!(find_structural(text, 11), None);
/// ```
pub fn find_structural(bytes: &[u8], from: usize) -> Option<usize> {
    let rest = bytes.get(from..)?;
    rest.iter()
        .position(|&b| is_structural(b))
        .map(|offset| from + offset)
}

/// JSON insignificant whitespace: space, tab, line feed, carriage return.
pub fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// `text` with JSON whitespace removed from both ends.
pub fn trim_json_whitespace(text: &str) -> &str {
    text.trim_matches(is_json_whitespace)
}
