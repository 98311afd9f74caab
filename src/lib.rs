//! recordlink - Record-linkage string primitives
//!
//! Decides whether two textual identifiers (e.g. person names) refer to the
//! same entity.
//!
//! # Features
//! - Unicode-aware normalization (NFKC, case folding, accent stripping)
//! - Levenshtein distance with bounded early cutoff
//! - Jaro and Jaro-Winkler similarity
//! - Soundex and Metaphone phonetic codes, usable as blocking keys
//! - Weighted scoring over Jaro-Winkler and normalized Levenshtein
//!
//! Every function is pure and total: degenerate inputs produce sentinel
//! values (empty code, distance 0, score 0.0) rather than errors. The only
//! fallible surface is scorer configuration.
//!
//! # Example
//! ```
//! use recordlink::{normalize, jaro_winkler, soundex_block_key, Scorer};
//!
//! let a = normalize("José López");
//! let b = normalize("Jose Lopes");
//! assert_eq!(soundex_block_key(&a), soundex_block_key(&b));
//!
//! let scorer: Scorer = "jw=0.7,lev=0.3".parse().unwrap();
//! assert!(scorer.score(&a, &b) > 0.85);
//! assert!(jaro_winkler(&a, &b) > 0.9);
//! ```

pub mod algorithms;
pub mod blocking;
pub mod scoring;

pub use algorithms::{
    jaro, jaro_winkler, jaro_winkler_with, levenshtein, levenshtein_similarity, metaphone,
    metaphone_match, normalize, soundex, soundex_match, EditDistance, Jaro, JaroWinkler,
    JaroWinklerConfig, Levenshtein, Metaphone, Normalizer, PhoneticEncoder, Similarity, Soundex,
};
pub use blocking::{metaphone_block_key, soundex_block_key};
pub use scoring::{Metric, Scorer, ScorerError};
