//! Weighted similarity scoring
//!
//! Combines Jaro-Winkler and normalized Levenshtein into a single score:
//! the weighted sum of the configured metrics divided by the sum of their
//! weights. Metrics without a weight contribute to neither side.

use crate::algorithms::{jaro_winkler, levenshtein_similarity};
use ahash::AHashMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while building a [`Scorer`]
#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("Unknown metric: '{0}'. Valid: jw, lev")]
    UnknownMetric(String),

    #[error("Weight for '{metric}' must be a finite non-negative number, got {weight}")]
    InvalidWeight { metric: Metric, weight: f64 },

    #[error("Malformed weight entry '{0}', expected name=weight")]
    MalformedEntry(String),

    #[error("Duplicate weight for metric '{0}'")]
    DuplicateMetric(Metric),

    #[error("Invalid scorer config: {0}")]
    Config(#[from] serde_json::Error),
}

/// A metric the scorer knows how to weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Jaro-Winkler with default prefix parameters
    #[serde(rename = "jw")]
    JaroWinkler,
    /// `1 - levenshtein / max(|a|, |b|)`
    #[serde(rename = "lev")]
    Levenshtein,
}

impl Metric {
    /// Evaluation order; fixed so sums are reproducible
    pub const ALL: [Metric; 2] = [Metric::JaroWinkler, Metric::Levenshtein];

    /// Configuration key
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Metric::JaroWinkler => "jw",
            Metric::Levenshtein => "lev",
        }
    }

    /// Similarity of `a` and `b` under this metric
    #[must_use]
    pub fn evaluate(self, a: &str, b: &str) -> f64 {
        match self {
            Metric::JaroWinkler => jaro_winkler(a, b),
            Metric::Levenshtein => levenshtein_similarity(a, b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = ScorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "jw" => Ok(Metric::JaroWinkler),
            "lev" => Ok(Metric::Levenshtein),
            other => Err(ScorerError::UnknownMetric(other.to_string())),
        }
    }
}

fn validate_weight(metric: Metric, weight: f64) -> Result<f64, ScorerError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(ScorerError::InvalidWeight { metric, weight });
    }
    Ok(weight)
}

/// Unvalidated scorer configuration as it appears on the wire
#[derive(Debug, Deserialize)]
struct RawScorer {
    #[serde(default, deserialize_with = "weight_entries")]
    weights: Option<Vec<(String, f64)>>,
}

/// Reads the `weights` map as ordered entries so repeated keys reach validation.
fn weight_entries<'de, D>(deserializer: D) -> Result<Option<Vec<(String, f64)>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Option<Vec<(String, f64)>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of metric names to weights")
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_map(self)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, f64>()? {
                entries.push(entry);
            }
            Ok(Some(entries))
        }
    }

    deserializer.deserialize_option(EntriesVisitor)
}

/// Weighted similarity scorer.
///
/// Immutable once built; cheap to clone and safe to share across threads.
///
/// # Examples
/// ```
/// use recordlink::{Metric, Scorer};
///
/// let scorer = Scorer::new([(Metric::JaroWinkler, 0.7), (Metric::Levenshtein, 0.3)]).unwrap();
/// let s = scorer.score("martha", "marhta");
/// assert!(s > 0.8 && s < 1.0);
///
/// let parsed: Scorer = "jw=0.7,lev=0.3".parse().unwrap();
/// assert_eq!(parsed, scorer);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScorer")]
pub struct Scorer {
    weights: AHashMap<Metric, f64>,
}

impl Default for Scorer {
    /// Jaro-Winkler only, weight 1.0
    fn default() -> Self {
        let mut weights = AHashMap::with_capacity(1);
        weights.insert(Metric::JaroWinkler, 1.0);
        Self { weights }
    }
}

impl Scorer {
    /// Build a scorer from `(metric, weight)` pairs.
    ///
    /// Weights must be finite and non-negative; each metric may appear once.
    pub fn new(weights: impl IntoIterator<Item = (Metric, f64)>) -> Result<Self, ScorerError> {
        let mut map = AHashMap::new();
        for (metric, weight) in weights {
            let weight = validate_weight(metric, weight)?;
            if map.insert(metric, weight).is_some() {
                return Err(ScorerError::DuplicateMetric(metric));
            }
        }

        let scorer = Self { weights: map };
        debug!(weights = %scorer, "scorer configured");
        Ok(scorer)
    }

    /// Build a scorer from metric names (`"jw"`, `"lev"`).
    pub fn from_named<'a>(
        weights: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, ScorerError> {
        let pairs = weights
            .into_iter()
            .map(|(name, weight)| name.parse::<Metric>().map(|m| (m, weight)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(pairs)
    }

    /// Parse a JSON config such as `{"weights": {"jw": 0.7, "lev": 0.3}}`.
    ///
    /// A missing `weights` key yields the default scorer.
    pub fn from_json(json: &str) -> Result<Self, ScorerError> {
        let raw: RawScorer = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Weight configured for `metric`, if any
    #[must_use]
    pub fn weight(&self, metric: Metric) -> Option<f64> {
        self.weights.get(&metric).copied()
    }

    /// Configured metrics with their weights, in evaluation order
    pub fn weights(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL
            .into_iter()
            .filter_map(|m| self.weight(m).map(|w| (m, w)))
    }

    /// Raw value of every configured metric, in evaluation order
    #[must_use]
    pub fn components(&self, a: &str, b: &str) -> Vec<(Metric, f64)> {
        self.weights().map(|(m, _)| (m, m.evaluate(a, b))).collect()
    }

    /// Weighted similarity of `a` and `b` in [0, 1].
    ///
    /// Returns 0.0 when no metric is configured or every weight is zero.
    /// Weights are scaled by the largest one first, so the sum stays finite.
    #[must_use]
    pub fn score(&self, a: &str, b: &str) -> f64 {
        let largest = self.weights().map(|(_, w)| w).fold(0.0, f64::max);
        if largest == 0.0 {
            return 0.0;
        }

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (metric, weight) in self.weights() {
            let weight = weight / largest;
            if weight == 0.0 {
                continue;
            }
            let value = metric.evaluate(a, b);
            trace!(%metric, weight, value, "metric evaluated");
            numerator += weight * value;
            denominator += weight;
        }

        if denominator == 0.0 {
            0.0
        } else {
            numerator / denominator
        }
    }
}

impl TryFrom<RawScorer> for Scorer {
    type Error = ScorerError;

    fn try_from(raw: RawScorer) -> Result<Self, Self::Error> {
        match raw.weights {
            None => Ok(Self::default()),
            Some(entries) => Self::from_named(entries.iter().map(|(k, v)| (k.as_str(), *v))),
        }
    }
}

impl FromStr for Scorer {
    type Err = ScorerError;

    /// Parse the compact `jw=0.7,lev=0.3` form. Blank entries are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pairs = Vec::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, weight) = entry
                .split_once('=')
                .ok_or_else(|| ScorerError::MalformedEntry(entry.to_string()))?;
            let metric: Metric = name.parse()?;
            let weight: f64 = weight
                .trim()
                .parse()
                .map_err(|_| ScorerError::MalformedEntry(entry.to_string()))?;
            pairs.push((metric, weight));
        }
        Self::new(pairs)
    }
}

impl fmt::Display for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (metric, weight) in self.weights() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{metric}={weight}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::levenshtein;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_is_jaro_winkler() {
        let scorer = Scorer::default();
        assert_eq!(scorer.weight(Metric::JaroWinkler), Some(1.0));
        assert_eq!(scorer.weight(Metric::Levenshtein), None);
        assert!(approx_eq(
            scorer.score("martha", "marhta"),
            jaro_winkler("martha", "marhta")
        ));
    }

    #[test]
    fn test_weighted_average() {
        let scorer = Scorer::new([(Metric::JaroWinkler, 0.7), (Metric::Levenshtein, 0.3)]).unwrap();
        let (a, b) = ("martha", "marhta");
        let lev_sim = 1.0 - levenshtein(a, b, None) as f64 / 6.0;
        let expected = 0.7 * jaro_winkler(a, b) + 0.3 * lev_sim;
        assert!(approx_eq(scorer.score(a, b), expected));
    }

    #[test]
    fn test_weights_not_summing_to_one_are_normalized() {
        let scorer = Scorer::new([(Metric::JaroWinkler, 2.0), (Metric::Levenshtein, 2.0)]).unwrap();
        let (a, b) = ("dwayne", "duane");
        let expected = (jaro_winkler(a, b) + levenshtein_similarity(a, b)) / 2.0;
        assert!(approx_eq(scorer.score(a, b), expected));
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let huge = Scorer::new([(Metric::JaroWinkler, 1e308), (Metric::Levenshtein, 1e308)]).unwrap();
        let unit = Scorer::new([(Metric::JaroWinkler, 1.0), (Metric::Levenshtein, 1.0)]).unwrap();
        let score = huge.score("martha", "marhta");
        assert!(score > 0.8);
        assert_eq!(score, unit.score("martha", "marhta"));
    }

    #[test]
    fn test_levenshtein_only() {
        let scorer = Scorer::new([(Metric::Levenshtein, 1.0)]).unwrap();
        assert!(approx_eq(scorer.score("kitten", "sitting"), 1.0 - 3.0 / 7.0));
        assert_eq!(scorer.score("", ""), 1.0);
    }

    #[test]
    fn test_empty_or_zero_weights_score_zero() {
        let empty = Scorer::new(Vec::new()).unwrap();
        assert_eq!(empty.score("same", "same"), 0.0);

        let zero = Scorer::new([(Metric::JaroWinkler, 0.0)]).unwrap();
        assert_eq!(zero.score("same", "same"), 0.0);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        assert!(matches!(
            Scorer::new([(Metric::JaroWinkler, -0.5)]),
            Err(ScorerError::InvalidWeight { .. })
        ));
        assert!(matches!(
            Scorer::new([(Metric::Levenshtein, f64::NAN)]),
            Err(ScorerError::InvalidWeight { .. })
        ));
        assert!(matches!(
            Scorer::new([(Metric::Levenshtein, 0.5), (Metric::Levenshtein, 0.5)]),
            Err(ScorerError::DuplicateMetric(Metric::Levenshtein))
        ));
    }

    #[test]
    fn test_from_named() {
        let scorer = Scorer::from_named([("jw", 0.5), ("lev", 0.5)]).unwrap();
        assert_eq!(scorer.weight(Metric::Levenshtein), Some(0.5));
        assert!(matches!(
            Scorer::from_named([("cosine", 1.0)]),
            Err(ScorerError::UnknownMetric(name)) if name == "cosine"
        ));
    }

    #[test]
    fn test_parse_compact_form() {
        let scorer: Scorer = " jw = 0.7 , lev=0.3 ,".parse().unwrap();
        assert_eq!(scorer.weight(Metric::JaroWinkler), Some(0.7));
        assert_eq!(scorer.weight(Metric::Levenshtein), Some(0.3));
        assert_eq!(scorer.to_string(), "jw=0.7,lev=0.3");

        assert!(matches!(
            "jw".parse::<Scorer>(),
            Err(ScorerError::MalformedEntry(_))
        ));
        assert!(matches!(
            "jw=heavy".parse::<Scorer>(),
            Err(ScorerError::MalformedEntry(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let scorer = Scorer::from_json(r#"{"weights": {"jw": 0.7, "lev": 0.3}}"#).unwrap();
        assert_eq!(scorer, "jw=0.7,lev=0.3".parse::<Scorer>().unwrap());

        assert_eq!(Scorer::from_json("{}").unwrap(), Scorer::default());
        assert!(matches!(
            Scorer::from_json(r#"{"weights": {"soundex": 1.0}}"#),
            Err(ScorerError::UnknownMetric(_))
        ));
        assert!(matches!(
            Scorer::from_json(r#"{"weights": {"jw": "high"}}"#),
            Err(ScorerError::Config(_))
        ));
        assert!(serde_json::from_str::<Scorer>(r#"{"weights": {"jw": -1.0}}"#).is_err());
        assert_eq!(
            Scorer::from_json(r#"{"weights": null}"#).unwrap(),
            Scorer::default()
        );
    }

    #[test]
    fn test_from_json_rejects_repeated_metric() {
        assert!(matches!(
            Scorer::from_json(r#"{"weights": {"jw": 0.5, "jw": 0.7}}"#),
            Err(ScorerError::DuplicateMetric(Metric::JaroWinkler))
        ));
    }

    #[test]
    fn test_serialize_uses_metric_keys() {
        let scorer = Scorer::new([(Metric::Levenshtein, 1.0)]).unwrap();
        let json = serde_json::to_string(&scorer).unwrap();
        assert_eq!(json, r#"{"weights":{"lev":1.0}}"#);
        let back: Scorer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scorer);
    }

    #[test]
    fn test_components_in_order() {
        let scorer: Scorer = "lev=1,jw=1".parse().unwrap();
        let components = scorer.components("martha", "marhta");
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].0, Metric::JaroWinkler);
        assert_eq!(components[1].0, Metric::Levenshtein);
    }
}
