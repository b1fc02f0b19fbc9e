use super::classifier::ClassifiedRound;
use crate::config::IntensityWeights;
use crate::model::outcome::ValueClass;
use serde::Serialize;

/// Inputs and result of the bounded "manipulation level" heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntensityScore {
    pub low_runs: usize,
    pub alternation_rate: f64,
    pub high_rate: f64,
    pub raw_score: f64,
    pub level: u8,
}

impl IntensityWeights {
    pub fn raw_score(&self, low_runs: usize, alternation_rate: f64, high_rate: f64) -> f64 {
        self.low_run * low_runs as f64 + self.alternation * alternation_rate
            - self.high_rate * high_rate
    }

    /// Rounds half to even, then clamps into `[min_level, max_level]`.
    pub fn level_for(&self, low_runs: usize, alternation_rate: f64, high_rate: f64) -> u8 {
        let rounded = self
            .raw_score(low_runs, alternation_rate, high_rate)
            .round_ties_even();
        rounded.clamp(f64::from(self.min_level), f64::from(self.max_level)) as u8
    }
}

pub fn score_intensity(rounds: &[ClassifiedRound], weights: &IntensityWeights) -> IntensityScore {
    if rounds.is_empty() {
        return IntensityScore {
            low_runs: 0,
            alternation_rate: 0.0,
            high_rate: 0.0,
            raw_score: 0.0,
            level: weights.min_level,
        };
    }

    let low_runs = count_low_runs(rounds, weights.min_low_run);
    let alternations = rounds
        .windows(2)
        .filter(|pair| pair[0].outcome != pair[1].outcome)
        .count();
    let alternation_rate = alternations as f64 / (rounds.len() - 1).max(1) as f64;
    let highs = rounds
        .iter()
        .filter(|round| round.value_class == ValueClass::High)
        .count();
    let high_rate = highs as f64 / rounds.len() as f64;

    IntensityScore {
        low_runs,
        alternation_rate,
        high_rate,
        raw_score: weights.raw_score(low_runs, alternation_rate, high_rate),
        level: weights.level_for(low_runs, alternation_rate, high_rate),
    }
}

/// Maximal runs of `Low` of at least `min_len` rounds.
fn count_low_runs(rounds: &[ClassifiedRound], min_len: usize) -> usize {
    let mut runs = 0;
    let mut current = 0;
    for round in rounds {
        if round.value_class == ValueClass::Low {
            current += 1;
        } else {
            if current >= min_len {
                runs += 1;
            }
            current = 0;
        }
    }
    if current >= min_len {
        runs += 1;
    }
    runs
}
