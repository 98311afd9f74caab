//! Blocking keys
//!
//! Cheap grouping keys for candidate-pair pruning. Records whose keys differ
//! are never compared pairwise; callers own the grouping structure.
//!
//! An empty key means the input had nothing to encode and should not be
//! grouped with other empty-keyed records.

use crate::algorithms::{metaphone, soundex};

/// Soundex code of `name`, for grouping.
#[inline]
#[must_use]
pub fn soundex_block_key(name: &str) -> String {
    soundex(name)
}

/// Metaphone code of `name`, for grouping.
#[inline]
#[must_use]
pub fn metaphone_block_key(name: &str) -> String {
    metaphone(name)
}
