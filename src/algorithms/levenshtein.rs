//! Levenshtein (edit) distance implementation
//!
//! Two rolling DP rows sized by the shorter operand, so working memory is
//! O(min(m, n)). An optional `max_distance` enables early cutoff: once a
//! complete row has every cell above the bound, the computation stops and
//! reports `max_distance + 1`.

use super::{normalized_similarity, EditDistance};
use smallvec::SmallVec;

/// Levenshtein distance calculator with optional early termination
///
/// # Complexity
/// - Time: O(m*n) where m and n are string lengths
/// - Space: O(min(m,n)) using two rolling rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein {
    /// Bound for early cutoff
    pub max_distance: Option<usize>,
}

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self { max_distance: None }
    }

    #[must_use]
    pub fn with_max_distance(max_distance: usize) -> Self {
        Self {
            max_distance: Some(max_distance),
        }
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        levenshtein(a, b, self.max_distance)
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Compute the Levenshtein distance between two strings.
///
/// Insertions, deletions and substitutions each cost 1. Lengths are counted
/// in `char`s.
///
/// When `max_distance` is `Some(k)` and a complete DP row has every value
/// above `k`, returns `k + 1` without finishing. That value means "more
/// than `k`", not the true distance. If no row trips the cutoff, the exact
/// distance is returned even when it exceeds `k`.
///
/// # Example
/// ```
/// use recordlink::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting", None), 3);
/// assert_eq!(levenshtein("abcdef", "ghijkl", Some(3)), 4);
/// ```
#[must_use]
pub fn levenshtein(a: &str, b: &str, max_distance: Option<usize>) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Shorter string on the column axis
    let (target, source) = if a_chars.len() <= b_chars.len() {
        (&a_chars[..], &b_chars[..])
    } else {
        (&b_chars[..], &a_chars[..])
    };

    dp_distance(target, source, max_distance)
}

/// Two-row DP; `target` is the shorter operand.
fn dp_distance(target: &[char], source: &[char], max_distance: Option<usize>) -> usize {
    let n = target.len();

    let mut prev: SmallVec<[usize; 64]> = (0..=n).collect();
    let mut curr: SmallVec<[usize; 64]> = smallvec::smallvec![0; n + 1];

    for (i, &sc) in source.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];

        for j in 1..=n {
            let cost = usize::from(sc != target[j - 1]);
            let cell = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
            curr[j] = cell;
            row_min = row_min.min(cell);
        }

        if let Some(max_d) = max_distance {
            if row_min > max_d {
                return max_d.saturating_add(1);
            }
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized similarity `1 - d / max(|a|, |b|)`, 1.0 for two empty strings.
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    normalized_similarity(levenshtein(a, b, None), a, b)
}
