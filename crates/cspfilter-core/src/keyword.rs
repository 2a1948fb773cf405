//! CSP keyword sources.

use std::fmt;

/// Keyword source tokens. Rendered single-quoted, as CSP requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    None,
    SelfOrigin,
    UnsafeEval,
    UnsafeInline,
}

impl Keyword {
    /// Bare keyword without quotes.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::None => "none",
            Keyword::SelfOrigin => "self",
            Keyword::UnsafeEval => "unsafe-eval",
            Keyword::UnsafeInline => "unsafe-inline",
        }
    }

    /// Quoted form used inside a directive, e.g. `'self'`.
    pub fn source(self) -> String {
        format!("'{}'", self.as_str())
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.as_str())
    }
}
