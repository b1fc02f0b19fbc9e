use super::classifier::ClassifiedRound;
use crate::model::outcome::Outcome;
use serde::Serialize;
use std::collections::BTreeMap;

/// First-order transition counts between consecutive outcomes.
///
/// `counts[from][to]` is the number of adjacent pairs `(from, to)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionMatrix {
    counts: [[u32; 3]; 3],
}

impl TransitionMatrix {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut counts = [[0u32; 3]; 3];
        for pair in outcomes.windows(2) {
            counts[pair[0].index()][pair[1].index()] += 1;
        }
        Self { counts }
    }

    pub fn count(&self, from: Outcome, to: Outcome) -> u32 {
        self.counts[from.index()][to.index()]
    }

    pub fn row_total(&self, from: Outcome) -> u32 {
        self.counts[from.index()].iter().sum()
    }

    /// `P(next = to | previous = from)`, `None` when `from` never preceded anything.
    pub fn probability(&self, from: Outcome, to: Outcome) -> Option<f64> {
        let total = self.row_total(from);
        (total > 0).then(|| f64::from(self.count(from, to)) / f64::from(total))
    }
}

/// Next-outcome distribution conditioned on the latest outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextOutcomeForecast {
    pub given: Outcome,
    pub observations: u32,
    pub probabilities: BTreeMap<Outcome, f64>,
}

impl NextOutcomeForecast {
    pub fn probability(&self, outcome: Outcome) -> f64 {
        self.probabilities.get(&outcome).copied().unwrap_or(0.0)
    }
}

/// Returns `None` with fewer than two rounds or when the latest outcome has
/// never been followed by another round.
pub fn forecast_next(rounds: &[ClassifiedRound]) -> Option<NextOutcomeForecast> {
    if rounds.len() < 2 {
        return None;
    }
    let outcomes: Vec<Outcome> = rounds.iter().map(|round| round.outcome).collect();
    let given = *outcomes.last()?;
    let matrix = TransitionMatrix::from_outcomes(&outcomes);
    let observations = matrix.row_total(given);
    if observations == 0 {
        return None;
    }

    let probabilities = Outcome::ALL
        .iter()
        .filter_map(|to| matrix.probability(given, *to).map(|p| (*to, p)))
        .collect();

    Some(NextOutcomeForecast {
        given,
        observations,
        probabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::outcome::Outcome::{SideA as A, SideB as B, Tie as T};
    use crate::model::outcome::ValueClass;

    fn rounds(outcomes: &[Outcome]) -> Vec<ClassifiedRound> {
        outcomes
            .iter()
            .enumerate()
            .map(|(index, outcome)| ClassifiedRound {
                index,
                outcome: *outcome,
                value_class: ValueClass::Medium,
                winning_rank: None,
            })
            .collect()
    }

    #[test]
    fn short_history_has_no_forecast() {
        assert!(forecast_next(&[]).is_none());
        assert!(forecast_next(&rounds(&[A])).is_none());
    }

    #[test]
    fn unseen_latest_outcome_has_no_forecast() {
        // The tie only appears last, so it never acts as "previous".
        assert!(forecast_next(&rounds(&[A, B, A, T])).is_none());
    }

    #[test]
    fn conditions_on_latest_outcome() {
        // Pairs starting at A: A->B, A->A, A->B. Latest outcome is A.
        let forecast = forecast_next(&rounds(&[A, B, A, A, B, T, A])).expect("forecast");
        assert_eq!(forecast.given, A);
        assert_eq!(forecast.observations, 3);
        assert!((forecast.probability(B) - 2.0 / 3.0).abs() < 1e-12);
        assert!((forecast.probability(A) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(forecast.probability(T), 0.0);
        let total: f64 = forecast.probabilities.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn matrix_counts_adjacent_pairs() {
        let matrix = TransitionMatrix::from_outcomes(&[A, A, B, A]);
        assert_eq!(matrix.count(A, A), 1);
        assert_eq!(matrix.count(A, B), 1);
        assert_eq!(matrix.count(B, A), 1);
        assert_eq!(matrix.row_total(T), 0);
        assert_eq!(matrix.probability(T, A), None);
    }
}
