/// Output character set for [`crate::encode::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// Non-ASCII text is written as literal UTF-8.
    #[default]
    Unicode,
    /// Every non-ASCII scalar is written as a `\uXXXX` escape.
    Ascii,
}

impl Charset {
    pub fn as_str(self) -> &'static str {
        match self {
            Charset::Unicode => "unicode",
            Charset::Ascii => "ascii",
        }
    }
}

/// Default nesting bound shared by the parser and the cleaning pass.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone)]
pub struct Options {
    /// Reject the lenient extensions (`NaN`/`Infinity` tokens, raw control
    /// characters in strings, lone surrogate escapes) when parsing.
    pub strict: bool,
    /// Maximum array/object nesting accepted by the parser. Values above
    /// [`crate::clean::MAX_CLEAN_DEPTH`] are capped to it.
    pub max_depth: usize,
    /// Skip the literal UTF-8 tier and always escape non-ASCII output.
    pub ascii_only: bool,
    /// Characters of raw upstream text kept in parse-failure diagnostics.
    pub preview_len: usize,
    /// Characters of an upstream error body surfaced as `details`.
    pub details_len: usize,
}

impl Options {
    /// Clamp `preview_len` into the 200..=1000 window diagnostics use.
    pub fn with_preview_len(mut self, len: usize) -> Self {
        self.preview_len = len.clamp(200, 1000);
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            ascii_only: false,
            preview_len: 500,
            details_len: 1000,
        }
    }
}
