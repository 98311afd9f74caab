//! Core record-linkage algorithms
//!
//! Each algorithm is implemented as a standalone function for composability,
//! plus a trait-based interface for callers that want to swap metrics.

pub mod jaro;
pub mod levenshtein;
pub mod normalize;
pub mod phonetic;

pub use jaro::*;
pub use levenshtein::*;
pub use normalize::*;
pub use phonetic::*;

/// Trait for bounded similarity metrics.
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Convenience method for distance (1.0 - similarity)
    fn distance(&self, a: &str, b: &str) -> f64 {
        1.0 - self.similarity(a, b)
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Trait for edit distance algorithms that return integer distances
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> usize;

    /// Convert to normalized similarity score (0.0 to 1.0)
    fn similarity(&self, a: &str, b: &str) -> f64 {
        normalized_similarity(self.distance(a, b), a, b)
    }

    fn name(&self) -> &'static str;
}

/// Blanket implementation: any EditDistance is also a Similarity
impl<T: EditDistance> Similarity for T {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        EditDistance::similarity(self, a, b)
    }

    fn name(&self) -> &'static str {
        EditDistance::name(self)
    }
}

/// Trait for phonetic encoders mapping a word to a short discrete code.
pub trait PhoneticEncoder: Send + Sync {
    fn encode(&self, s: &str) -> String;

    /// Two inputs collide when they encode to the same non-empty code.
    fn matches(&self, a: &str, b: &str) -> bool {
        let code_a = self.encode(a);
        !code_a.is_empty() && code_a == self.encode(b)
    }

    fn name(&self) -> &'static str;
}

/// `1 - distance / max(|a|, |b|)`, with two empty strings scoring 1.0.
#[inline]
pub(crate) fn normalized_similarity(distance: usize, a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        1.0
    } else {
        1.0 - (distance as f64 / max_len as f64)
    }
}
