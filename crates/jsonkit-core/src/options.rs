//! Parser configuration.

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Knobs controlling how permissive the parser is.
///
/// The default is lenient: empty array slots such as `[1,,2]` or `[1,]` and a
/// trailing comma before `}` are silently dropped. Strict mode rejects them.
///
/// ```
/// use jsonkit_core::{parse_with, ParseOptions, ValueFactory};
///
/// let lenient = parse_with("[1,,2]", &ValueFactory, &ParseOptions::default());
/// assert!(lenient.is_ok());
///
/// let strict = parse_with("[1,,2]", &ValueFactory, &ParseOptions::default().strict());
/// assert!(strict.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject empty array elements and trailing commas.
    pub strict: bool,
    /// Maximum number of nested containers, counting the root.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
