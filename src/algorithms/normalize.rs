//! String normalization utilities
//!
//! Canonicalizes raw identifiers into a comparable form before they are
//! handed to the distance and similarity metrics.
//!
//! The pipeline is fixed:
//! 1. Unicode NFKC to fold compatibility variants (ligatures, full-width forms)
//! 2. Full case folding (`ß` → `ss`, not just lowercasing)
//! 3. NFKD decomposition with every mark of non-zero combining class discarded
//! 4. Anything that is not an ASCII digit, ASCII lowercase letter, whitespace
//!    or an explicitly kept character becomes a space
//! 5. Whitespace runs collapse to one space; the ends are trimmed

use serde::{Deserialize, Serialize};
use unicode_casefold::UnicodeCaseFold;
use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Normalizer with an optional set of extra characters to preserve.
///
/// `Normalizer::default()` keeps nothing beyond `[0-9a-z]` and spaces.
///
/// # Examples
/// ```
/// use recordlink::Normalizer;
///
/// let n = Normalizer::with_keep_chars("-'");
/// assert_eq!(n.apply("O'Brien-Smith"), "o'brien-smith");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalizer {
    /// Characters copied through verbatim instead of being replaced by a space
    #[serde(default)]
    pub keep_chars: String,
}

impl Normalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_keep_chars(keep_chars: impl Into<String>) -> Self {
        Self {
            keep_chars: keep_chars.into(),
        }
    }

    /// Normalize a string. Total over all inputs.
    #[must_use]
    pub fn apply(&self, s: &str) -> String {
        if s.is_empty() {
            return String::new();
        }

        let mut out = String::with_capacity(s.len());
        let mut pending_space = false;

        // Spacing marks have class 0 and fall through to the replacement below
        let decomposed = s
            .nfkc()
            .case_fold()
            .nfkd()
            .filter(|&c| canonical_combining_class(c) == 0);

        for c in decomposed {
            if !c.is_whitespace() && self.keeps(c) {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
            } else {
                pending_space = true;
            }
        }

        out
    }

    #[inline]
    fn keeps(&self, c: char) -> bool {
        c.is_ascii_digit() || c.is_ascii_lowercase() || self.keep_chars.contains(c)
    }
}

/// Normalize a string with the default rules.
///
/// # Examples
/// ```
/// use recordlink::normalize;
///
/// assert_eq!(normalize("José López"), "jose lopez");
/// assert_eq!(normalize("  Straße  "), "strasse");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(s: &str) -> String {
    Normalizer::default().apply(s)
}
