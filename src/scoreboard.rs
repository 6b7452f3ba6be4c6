//! Comparison scoreboard evaluation.
//!
//! Given a page's contenders and its scored criteria, computes:
//!
//! - the winner of each criterion (or [`Winner::Tie`] when two or more
//!   contenders share the top score),
//! - each contender's mean score across all criteria,
//! - the overall winner (highest mean).
//!
//! # Tie Semantics
//!
//! Per-criterion ties use exact `f64` equality on the authored values. Pages
//! deliberately encode parity by giving two contenders the same score, so no
//! epsilon is applied.
//!
//! The overall winner is the contender with the strictly highest raw mean;
//! among equal means the first contender in page order wins. Overall ties
//! are not collapsed to [`Winner::Tie`]. Callers that want to surface them
//! can ask [`Scoreboard::tied_leaders`].
//!
//! # Scores
//!
//! Every contender must have a score for every criterion. A literal `0` is
//! an explicit score and is averaged like any other value; pages use it to
//! mark a dimension a product does not cover at all.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::error::ContentError;
use crate::models::{Comparison, Criterion};

/// Highest score a criterion may carry.
pub const MAX_SCORE: f64 = 10.0;

/// Outcome of one criterion.
///
/// Serializes as the winning key, or the string `"Tie"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Winner {
    Contender(String),
    Tie,
}

impl Serialize for Winner {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Winner {
    pub fn is_tie(&self) -> bool {
        matches!(self, Winner::Tie)
    }

    /// The winning key, or `None` on a tie.
    pub fn key(&self) -> Option<&str> {
        match self {
            Winner::Contender(key) => Some(key),
            Winner::Tie => None,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Contender(key) => f.write_str(key),
            Winner::Tie => f.write_str("Tie"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionResult {
    pub label: String,
    pub best_score: f64,
    pub winner: Winner,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContenderAverage {
    pub key: String,
    /// Unrounded mean, used to pick the overall winner.
    pub average: f64,
    /// Mean rounded to one decimal place, for output.
    pub display: f64,
}

/// Derived results for one comparison page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoreboard {
    pub criteria: Vec<CriterionResult>,
    /// One entry per contender, in page order.
    pub averages: Vec<ContenderAverage>,
    pub overall_winner: String,
}

impl Scoreboard {
    pub fn average_of(&self, key: &str) -> Option<f64> {
        self.averages
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.average)
    }

    /// Every contender whose raw mean equals the maximum, in page order.
    ///
    /// A single entry means the overall winner is unambiguous.
    pub fn tied_leaders(&self) -> Vec<&str> {
        let best = self
            .averages
            .iter()
            .map(|a| a.average)
            .fold(f64::NEG_INFINITY, f64::max);
        self.averages
            .iter()
            .filter(|a| a.average == best)
            .map(|a| a.key.as_str())
            .collect()
    }

    pub fn has_overall_tie(&self) -> bool {
        self.tied_leaders().len() > 1
    }

    /// How many criteria each contender won outright, in page order.
    pub fn criteria_won(&self) -> Vec<(&str, usize)> {
        self.averages
            .iter()
            .map(|a| {
                let won = self
                    .criteria
                    .iter()
                    .filter(|c| c.winner.key() == Some(a.key.as_str()))
                    .count();
                (a.key.as_str(), won)
            })
            .collect()
    }
}

/// Round a mean to one decimal place for display.
pub fn round_display(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Evaluate a comparison page's scoreboard.
pub fn evaluate_comparison(comparison: &Comparison) -> Result<Scoreboard, ContentError> {
    evaluate(&comparison.contender_keys(), &comparison.criteria)
}

/// Evaluate `criteria` for the contenders named by `keys`.
///
/// `keys` fixes the contender order used for averages and for breaking
/// overall ties.
pub fn evaluate(keys: &[&str], criteria: &[Criterion]) -> Result<Scoreboard, ContentError> {
    validate_keys(keys)?;
    if criteria.is_empty() {
        return Err(ContentError::EmptyCriteria);
    }

    let mut sums = vec![0.0_f64; keys.len()];
    let mut results = Vec::with_capacity(criteria.len());

    for criterion in criteria {
        let scores = criterion_scores(keys, criterion)?;
        for (sum, score) in sums.iter_mut().zip(&scores) {
            *sum += score;
        }
        results.push(criterion_winner(keys, criterion, &scores));
    }

    let n = criteria.len() as f64;
    let averages: Vec<ContenderAverage> = keys
        .iter()
        .zip(sums)
        .map(|(key, sum)| {
            let average = sum / n;
            ContenderAverage {
                key: key.to_string(),
                average,
                display: round_display(average),
            }
        })
        .collect();

    // Strict comparison keeps the first contender among equal means.
    let mut leader = &averages[0];
    for candidate in &averages[1..] {
        if candidate.average > leader.average {
            leader = candidate;
        }
    }
    let overall_winner = leader.key.clone();

    Ok(Scoreboard {
        criteria: results,
        averages,
        overall_winner,
    })
}

/// Lowercase letters, digits and inner hyphens.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('-')
        && !key.ends_with('-')
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn validate_keys(keys: &[&str]) -> Result<(), ContentError> {
    if keys.is_empty() {
        return Err(ContentError::EmptyContenders);
    }
    let mut seen = HashSet::new();
    for key in keys {
        if !is_valid_key(key) {
            return Err(ContentError::InvalidKey(key.to_string()));
        }
        if !seen.insert(*key) {
            return Err(ContentError::DuplicateContender(key.to_string()));
        }
    }
    Ok(())
}

/// Scores for `criterion` in `keys` order.
fn criterion_scores(keys: &[&str], criterion: &Criterion) -> Result<Vec<f64>, ContentError> {
    if let Some(unknown) = criterion.scores.keys().find(|k| !keys.contains(&k.as_str())) {
        return Err(ContentError::UnknownContender {
            criterion: criterion.label.clone(),
            contender: unknown.clone(),
        });
    }

    keys.iter()
        .map(|key| {
            let score = *criterion
                .scores
                .get(*key)
                .ok_or_else(|| ContentError::MissingScore {
                    criterion: criterion.label.clone(),
                    contender: key.to_string(),
                })?;
            if !score.is_finite() || !(0.0..=MAX_SCORE).contains(&score) {
                return Err(ContentError::ScoreOutOfRange {
                    criterion: criterion.label.clone(),
                    contender: key.to_string(),
                    score,
                });
            }
            Ok(score)
        })
        .collect()
}

fn criterion_winner(keys: &[&str], criterion: &Criterion, scores: &[f64]) -> CriterionResult {
    let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut at_best = keys
        .iter()
        .zip(scores)
        .filter(|(_, score)| **score == best)
        .map(|(key, _)| *key);

    let winner = match (at_best.next(), at_best.next()) {
        (Some(key), None) => Winner::Contender(key.to_string()),
        _ => Winner::Tie,
    };

    CriterionResult {
        label: criterion.label.clone(),
        best_score: best,
        winner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn criterion(label: &str, scores: &[(&str, f64)]) -> Criterion {
        Criterion {
            label: label.to_string(),
            scores: scores.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    /// Builds one criterion per column of `rows`, where each row is
    /// `(key, scores)`.
    fn criteria_from_columns(rows: &[(&str, Vec<f64>)]) -> Vec<Criterion> {
        let n = rows[0].1.len();
        (0..n)
            .map(|i| {
                let scores: Vec<(&str, f64)> = rows.iter().map(|(k, s)| (*k, s[i])).collect();
                criterion(&format!("criterion {}", i), &scores)
            })
            .collect()
    }

    #[test]
    fn test_tie_on_shared_maximum() {
        let c = vec![criterion("Ease of use", &[("a", 9.0), ("b", 9.0), ("c", 8.0)])];
        let board = evaluate(&["a", "b", "c"], &c).unwrap();
        assert_eq!(board.criteria[0].winner, Winner::Tie);
        assert_eq!(board.criteria[0].winner.to_string(), "Tie");
        assert_relative_eq!(board.criteria[0].best_score, 9.0);
    }

    #[test]
    fn test_single_winner() {
        let c = vec![criterion("Pricing", &[("a", 7.5), ("b", 8.1), ("c", 8.0)])];
        let board = evaluate(&["a", "b", "c"], &c).unwrap();
        assert_eq!(board.criteria[0].winner, Winner::Contender("b".into()));
    }

    #[test]
    fn test_tie_uses_exact_equality() {
        // 0.1 + 0.2 != 0.3 in f64; near-equal values are not a tie.
        let c = vec![criterion("Support", &[("a", 0.1 + 0.2), ("b", 0.3)])];
        let board = evaluate(&["a", "b"], &c).unwrap();
        assert_eq!(board.criteria[0].winner, Winner::Contender("a".into()));
    }

    #[test]
    fn test_average_and_display_rounding() {
        let c = criteria_from_columns(&[
            ("x", vec![8.8, 9.5, 8.2, 9.4, 9.0]),
            ("y", vec![8.0, 8.0, 8.0, 8.0, 8.0]),
        ]);
        let board = evaluate(&["x", "y"], &c).unwrap();
        assert_relative_eq!(board.average_of("x").unwrap(), 8.98, epsilon = 1e-9);
        assert_relative_eq!(board.averages[0].display, 9.0);
        assert_eq!(format!("{:.1}", board.averages[0].display), "9.0");
    }

    #[test]
    fn test_averages_serialize_display_value() {
        let c = criteria_from_columns(&[("x", vec![9.0, 8.0, 9.0]), ("y", vec![8.0, 7.0, 8.0])]);
        let board = evaluate(&["x", "y"], &c).unwrap();
        let json = serde_json::to_value(&board.averages).unwrap();
        assert_eq!(json[0]["key"], "x");
        assert_eq!(json[0]["display"], 8.7);
        assert_eq!(json[1]["display"], 7.7);
    }

    #[test]
    fn test_overall_winner_highest_average() {
        let c = criteria_from_columns(&[
            ("a", vec![8.8, 9.5, 8.2, 9.4, 9.0]),
            ("b", vec![8.0, 8.5, 8.1, 8.6, 8.9]),
            ("c", vec![8.7, 8.8, 8.6, 8.9, 8.8]),
        ]);
        let board = evaluate(&["a", "b", "c"], &c).unwrap();
        assert_relative_eq!(board.average_of("a").unwrap(), 8.98, epsilon = 1e-9);
        assert_relative_eq!(board.average_of("b").unwrap(), 8.42, epsilon = 1e-9);
        assert_relative_eq!(board.average_of("c").unwrap(), 8.76, epsilon = 1e-9);
        assert_eq!(board.overall_winner, "a");
        assert!(!board.has_overall_tie());
    }

    #[test]
    fn test_zero_is_a_real_score() {
        let c = criteria_from_columns(&[
            ("a", vec![9.4, 8.2, 9.7, 7.6, 0.0]),
            ("b", vec![5.0, 5.0, 5.0, 5.0, 5.0]),
        ]);
        let board = evaluate(&["a", "b"], &c).unwrap();
        // 34.9 / 5, not 34.9 / 4
        assert_relative_eq!(board.average_of("a").unwrap(), 6.98, epsilon = 1e-9);
        assert_relative_eq!(board.averages[0].display, 7.0);
    }

    #[test]
    fn test_missing_score_fails() {
        let c = vec![criterion("Integrations", &[("a", 9.0)])];
        let err = evaluate(&["a", "b"], &c).unwrap_err();
        assert_eq!(
            err,
            ContentError::MissingScore {
                criterion: "Integrations".into(),
                contender: "b".into()
            }
        );
    }

    #[test]
    fn test_empty_criteria_fails() {
        let err = evaluate(&["a", "b"], &[]).unwrap_err();
        assert_eq!(err, ContentError::EmptyCriteria);
    }

    #[test]
    fn test_unknown_contender_fails() {
        let c = vec![criterion("Speed", &[("a", 9.0), ("b", 8.0), ("zz", 7.0)])];
        let err = evaluate(&["a", "b"], &c).unwrap_err();
        assert!(matches!(err, ContentError::UnknownContender { .. }));
    }

    #[test]
    fn test_out_of_range_score_fails() {
        let c = vec![criterion("Speed", &[("a", 10.5), ("b", 8.0)])];
        let err = evaluate(&["a", "b"], &c).unwrap_err();
        assert!(matches!(err, ContentError::ScoreOutOfRange { .. }));

        let c = vec![criterion("Speed", &[("a", f64::NAN), ("b", 8.0)])];
        assert!(evaluate(&["a", "b"], &c).is_err());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let c = vec![criterion("Speed", &[("a", 10.0), ("b", 0.0)])];
        let board = evaluate(&["a", "b"], &c).unwrap();
        assert_eq!(board.overall_winner, "a");
    }

    #[test]
    fn test_duplicate_and_invalid_keys() {
        let c = vec![criterion("Speed", &[("a", 1.0)])];
        assert_eq!(
            evaluate(&["a", "a"], &c).unwrap_err(),
            ContentError::DuplicateContender("a".into())
        );
        assert_eq!(
            evaluate(&["Zoom"], &c).unwrap_err(),
            ContentError::InvalidKey("Zoom".into())
        );
        assert_eq!(evaluate(&[], &c).unwrap_err(), ContentError::EmptyContenders);
    }

    #[test]
    fn test_overall_tie_picks_first_and_is_reported() {
        let c = criteria_from_columns(&[
            ("a", vec![8.0, 9.0]),
            ("b", vec![9.0, 8.0]),
            ("c", vec![7.0, 7.0]),
        ]);
        let board = evaluate(&["a", "b", "c"], &c).unwrap();
        assert_eq!(board.overall_winner, "a");
        assert_eq!(board.tied_leaders(), vec!["a", "b"]);
        assert!(board.has_overall_tie());

        let board = evaluate(&["b", "a", "c"], &c).unwrap();
        assert_eq!(board.overall_winner, "b");
    }

    #[test]
    fn test_criteria_won_skips_ties() {
        let c = vec![
            criterion("One", &[("a", 9.0), ("b", 8.0)]),
            criterion("Two", &[("a", 9.0), ("b", 9.0)]),
            criterion("Three", &[("a", 7.0), ("b", 8.0)]),
        ];
        let board = evaluate(&["a", "b"], &c).unwrap();
        assert_eq!(board.criteria_won(), vec![("a", 1), ("b", 1)]);
    }

    #[test]
    fn test_deterministic() {
        let c = criteria_from_columns(&[("a", vec![8.8, 9.5, 8.2]), ("b", vec![9.1, 7.3, 8.2])]);
        let first = evaluate(&["a", "b"], &c).unwrap();
        let second = evaluate(&["a", "b"], &c).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_winner_serializes_tie_as_string() {
        let json = serde_json::to_value(Winner::Tie).unwrap();
        assert_eq!(json, serde_json::json!("Tie"));
        let json = serde_json::to_value(Winner::Contender("zoom".into())).unwrap();
        assert_eq!(json, serde_json::json!("zoom"));
    }
}
