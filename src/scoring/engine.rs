use crate::catalog::{Criterion, WEIGHT_TOTAL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Lowest selectable rating.
pub const MIN_RATING: u8 = 1;
/// Highest selectable rating.
pub const MAX_RATING: u8 = 5;
/// Every criterion starts at the midpoint.
pub const DEFAULT_RATING: u8 = 3;

#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    #[error("invalid catalog: weights sum to {0}, expected {expected}", expected = WEIGHT_TOTAL)]
    InvalidCatalog(f64),

    #[error("no rating for criterion '{0}'")]
    MissingRating(String),

    #[error("rating {value} for criterion '{key}' is outside 1-5")]
    InvalidRating { key: String, value: u8 },
}

/// The current rating for each criterion, keyed by `Criterion::key`.
///
/// Owned by the caller (TUI or CLI); the engine only reads it. Mutation is
/// one key at a time through [`RatingSet::set`], which clamps to the valid
/// range the same way the slider control does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingSet(BTreeMap<String, u8>);

impl RatingSet {
    /// Every catalog criterion at the default rating.
    pub fn default_for(catalog: &[Criterion]) -> Self {
        Self(
            catalog
                .iter()
                .map(|c| (c.key.to_string(), DEFAULT_RATING))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<u8> {
        self.0.get(key).copied()
    }

    /// Set one criterion's rating, clamped to [1,5].
    pub fn set(&mut self, key: &str, rating: u8) {
        self.0
            .insert(key.to_string(), rating.clamp(MIN_RATING, MAX_RATING));
    }

    /// Adjust one criterion's rating by a signed step, saturating at the
    /// range bounds. Returns the new value if the key exists.
    pub fn bump(&mut self, key: &str, delta: i8) -> Option<u8> {
        let current = self.get(key)?;
        let next = (current as i8 + delta).clamp(MIN_RATING as i8, MAX_RATING as i8) as u8;
        self.0.insert(key.to_string(), next);
        Some(next)
    }

    /// Rebuild against a catalog: keep known keys (clamped), drop unknown
    /// ones, fill missing ones with the default. Used when loading saved
    /// state that may predate a catalog change.
    pub fn sanitized_for(&self, catalog: &[Criterion]) -> Self {
        Self(
            catalog
                .iter()
                .map(|c| {
                    let rating = self
                        .get(c.key)
                        .map(|r| r.clamp(MIN_RATING, MAX_RATING))
                        .unwrap_or(DEFAULT_RATING);
                    (c.key.to_string(), rating)
                })
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, u8)> for RatingSet {
    fn from_iter<T: IntoIterator<Item = (String, u8)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The fee anchor points. The mapping from score to fee is the straight line
/// through (lowest possible score, min_fee) and (highest possible score,
/// max_fee); the slope is always derived from these, never hard-coded, so
/// editing the anchors keeps the extremes exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub min_fee: f64,
    pub max_fee: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            min_fee: 1500.0,
            max_fee: 10000.0,
        }
    }
}

impl FeeSchedule {
    /// Lowest achievable total score: all ratings at 1.
    pub fn min_score() -> f64 {
        WEIGHT_TOTAL * (MIN_RATING as f64 / MAX_RATING as f64)
    }

    /// Fee per score point. With the default schedule this is
    /// (10000 - 1500) / (100 - 20) = 106.25.
    pub fn slope(&self) -> f64 {
        (self.max_fee - self.min_fee) / (WEIGHT_TOTAL - Self::min_score())
    }

    /// Map a total score to a whole-currency fee.
    pub fn fee_for(&self, total_score: f64) -> i64 {
        (self.min_fee + (total_score - Self::min_score()) * self.slope()).round() as i64
    }
}

/// How much one criterion contributed to the total score.
#[derive(Debug, Clone, Serialize)]
pub struct CriterionContribution {
    pub key: &'static str,
    pub label: &'static str,
    pub rating: u8,
    pub weight: f64,
    /// `rating / 5 * weight`, the criterion's share of the total score.
    pub points: f64,
}

/// A computed quote. Derived, never stored: always a pure function of the
/// catalog, the fee schedule and the current ratings.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub total_score: f64,
    pub fee: i64,
    pub breakdown: Vec<CriterionContribution>,
}

impl Quote {
    /// Score rounded to one decimal for display. Computed from the raw
    /// score; the fee is never derived from this rounded value.
    pub fn display_score(&self) -> f64 {
        (self.total_score * 10.0).round() / 10.0
    }
}

/// Compute a quote from the current ratings.
///
/// Pure and stateless: no side effects, identical output for identical
/// input. Fails fast on a malformed catalog or a rating set that does not
/// cover it; both are programmer errors, not runtime conditions.
pub fn compute_quote(
    catalog: &[Criterion],
    schedule: &FeeSchedule,
    ratings: &RatingSet,
) -> Result<Quote, QuoteError> {
    let weight_sum: f64 = catalog.iter().map(|c| c.weight).sum();
    if (weight_sum - WEIGHT_TOTAL).abs() > 1e-9 {
        return Err(QuoteError::InvalidCatalog(weight_sum));
    }

    let mut total_score = 0.0;
    let mut breakdown = Vec::with_capacity(catalog.len());

    for criterion in catalog {
        let rating = ratings
            .get(criterion.key)
            .ok_or_else(|| QuoteError::MissingRating(criterion.key.to_string()))?;
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(QuoteError::InvalidRating {
                key: criterion.key.to_string(),
                value: rating,
            });
        }

        let normalized = rating as f64 / MAX_RATING as f64;
        let points = normalized * criterion.weight;
        total_score += points;

        breakdown.push(CriterionContribution {
            key: criterion.key,
            label: criterion.label,
            rating,
            weight: criterion.weight,
            points,
        });
    }

    Ok(Quote {
        total_score,
        fee: schedule.fee_for(total_score),
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;

    fn uniform_ratings(rating: u8) -> RatingSet {
        catalog()
            .iter()
            .map(|c| (c.key.to_string(), rating))
            .collect()
    }

    fn quote_for(ratings: &RatingSet) -> Quote {
        compute_quote(catalog(), &FeeSchedule::default(), ratings).unwrap()
    }

    #[test]
    fn test_all_ones_hits_minimum_fee() {
        let quote = quote_for(&uniform_ratings(1));
        assert!((quote.total_score - 20.0).abs() < 1e-9);
        assert_eq!(quote.fee, 1500);
    }

    #[test]
    fn test_all_fives_hits_maximum_fee() {
        let quote = quote_for(&uniform_ratings(5));
        assert!((quote.total_score - 100.0).abs() < 1e-9);
        assert_eq!(quote.fee, 10000);
    }

    #[test]
    fn test_defaults_land_at_midpoint() {
        let quote = quote_for(&RatingSet::default_for(catalog()));
        assert!((quote.total_score - 60.0).abs() < 1e-9);
        assert_eq!(quote.fee, 5750);
    }

    #[test]
    fn test_slope_is_derived_from_anchors() {
        assert!((FeeSchedule::default().slope() - 106.25).abs() < 1e-9);
        assert_eq!(FeeSchedule::min_score(), 20.0);

        // A different schedule re-derives its own slope and still hits both
        // anchors exactly at the score extremes
        let custom = FeeSchedule {
            min_fee: 2000.0,
            max_fee: 12000.0,
        };
        assert_eq!(custom.fee_for(20.0), 2000);
        assert_eq!(custom.fee_for(100.0), 12000);
    }

    #[test]
    fn test_single_bump_strictly_increases_score() {
        for criterion in catalog() {
            let mut ratings = uniform_ratings(2);
            let before = quote_for(&ratings);
            ratings.set(criterion.key, 3);
            let after = quote_for(&ratings);
            assert!(
                after.total_score > before.total_score,
                "bumping '{}' did not raise the score",
                criterion.key
            );
            assert!(after.fee >= before.fee);
        }
    }

    #[test]
    fn test_one_criterion_low_rest_high() {
        // methodology at 1, everything else at 5:
        // 100 - 25 * (1 - 1/5) = 80
        let mut ratings = uniform_ratings(5);
        ratings.set("methodology", 1);
        let quote = quote_for(&ratings);
        assert!((quote.total_score - 80.0).abs() < 1e-9);
        assert_eq!(quote.fee, 7875);
    }

    #[test]
    fn test_mixed_scenario_regression() {
        let pairs = [
            ("sector", 2),
            ("size", 4),
            ("purpose", 1),
            ("methodology", 5),
            ("data", 3),
            ("cooperation", 2),
            ("structure", 4),
            ("volatility", 1),
            ("plan", 5),
            ("sensitivity", 3),
        ];
        let ratings: RatingSet = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v as u8))
            .collect();

        // Hand-computed: 1.0 + 2.0 + 2.0 + 25.0 + 6.0 + 6.0 + 8.0 + 0.5
        //              + 20.0 + 1.5 = 72.0
        let quote = quote_for(&ratings);
        assert!((quote.total_score - 72.0).abs() < 1e-9);
        assert_eq!(quote.fee, 7025);
    }

    #[test]
    fn test_compute_quote_is_idempotent() {
        let ratings = uniform_ratings(4);
        let first = quote_for(&ratings);
        let second = quote_for(&ratings);
        assert_eq!(first.total_score, second.total_score);
        assert_eq!(first.fee, second.fee);
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let quote = quote_for(&uniform_ratings(4));
        let sum: f64 = quote.breakdown.iter().map(|c| c.points).sum();
        assert!((sum - quote.total_score).abs() < 1e-9);
        assert_eq!(quote.breakdown.len(), catalog().len());
    }

    #[test]
    fn test_missing_rating_fails() {
        let ratings: RatingSet = uniform_ratings(3)
            .iter()
            .filter(|(k, _)| *k != "plan")
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let err = compute_quote(catalog(), &FeeSchedule::default(), &ratings).unwrap_err();
        assert_eq!(err, QuoteError::MissingRating("plan".to_string()));
    }

    #[test]
    fn test_out_of_range_rating_fails() {
        // The setter clamps, so build the bad value through FromIterator
        let ratings: RatingSet = catalog()
            .iter()
            .map(|c| {
                let v = if c.key == "data" { 9 } else { 3 };
                (c.key.to_string(), v)
            })
            .collect();

        let err = compute_quote(catalog(), &FeeSchedule::default(), &ratings).unwrap_err();
        assert_eq!(
            err,
            QuoteError::InvalidRating {
                key: "data".to_string(),
                value: 9,
            }
        );
    }

    #[test]
    fn test_bad_weight_sum_fails() {
        let bad_catalog = [Criterion {
            key: "only",
            label: "Only criterion",
            weight: 50.0,
            levels: ["1", "2", "3", "4", "5"],
        }];
        let ratings: RatingSet = [("only".to_string(), 3)].into_iter().collect();

        let err = compute_quote(&bad_catalog, &FeeSchedule::default(), &ratings).unwrap_err();
        assert_eq!(err, QuoteError::InvalidCatalog(50.0));
    }

    #[test]
    fn test_display_score_rounds_to_one_decimal() {
        let quote = Quote {
            total_score: 72.34999,
            fee: 0,
            breakdown: vec![],
        };
        assert_eq!(quote.display_score(), 72.3);

        let quote = Quote {
            total_score: 72.35001,
            fee: 0,
            breakdown: vec![],
        };
        assert_eq!(quote.display_score(), 72.4);
    }

    #[test]
    fn test_set_clamps_to_slider_range() {
        let mut ratings = RatingSet::default_for(catalog());
        ratings.set("sector", 0);
        assert_eq!(ratings.get("sector"), Some(1));
        ratings.set("sector", 200);
        assert_eq!(ratings.get("sector"), Some(5));
    }

    #[test]
    fn test_bump_saturates_at_bounds() {
        let mut ratings = RatingSet::default_for(catalog());
        assert_eq!(ratings.bump("plan", 1), Some(4));
        assert_eq!(ratings.bump("plan", 1), Some(5));
        assert_eq!(ratings.bump("plan", 1), Some(5));
        assert_eq!(ratings.bump("plan", -1), Some(4));
        assert_eq!(ratings.bump("unknown", 1), None);
    }

    #[test]
    fn test_sanitized_for_repairs_saved_state() {
        let stale: RatingSet = [
            ("sector".to_string(), 9),   // out of range -> clamped
            ("retired".to_string(), 2),  // unknown key -> dropped
            ("plan".to_string(), 4),
        ]
        .into_iter()
        .collect();

        let repaired = stale.sanitized_for(catalog());
        assert_eq!(repaired.get("sector"), Some(5));
        assert_eq!(repaired.get("plan"), Some(4));
        assert_eq!(repaired.get("retired"), None);
        // Missing keys filled with the default
        assert_eq!(repaired.get("methodology"), Some(DEFAULT_RATING));
        assert_eq!(repaired.iter().count(), catalog().len());
    }
}
