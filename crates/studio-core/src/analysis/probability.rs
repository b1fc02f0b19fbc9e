use super::classifier::ClassifiedRound;
use crate::config::AnalyzerConfig;
use crate::model::outcome::Outcome;
use serde::Serialize;

const MIN_CONFIDENCE: f64 = 0.05;
const MAX_CONFIDENCE: f64 = 0.99;

/// Smoothed outcome probabilities in percent, with a peakness confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityEstimate {
    pub side_a: f64,
    pub side_b: f64,
    pub tie: f64,
    /// Share of the dominant score, clamped to [5, 99].
    pub confidence: f64,
}

impl ProbabilityEstimate {
    /// Baseline returned for an empty window.
    pub const NEUTRAL: ProbabilityEstimate = ProbabilityEstimate {
        side_a: 49.0,
        side_b: 49.0,
        tie: 2.0,
        confidence: 5.0,
    };

    pub fn of(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::SideA => self.side_a,
            Outcome::SideB => self.side_b,
            Outcome::Tie => self.tie,
        }
    }

    /// The side with the larger probability; equal values go to side B.
    pub fn leading_side(&self) -> Outcome {
        if self.side_a > self.side_b {
            Outcome::SideA
        } else {
            Outcome::SideB
        }
    }
}

/// Decay weights for `len` rounds, oldest first, normalized to sum to 1.
pub fn decay_weights(len: usize, decay: f64) -> Vec<f64> {
    let raw: Vec<f64> = (0..len)
        .map(|i| decay.powi((len - 1 - i) as i32))
        .collect();
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return raw;
    }
    raw.into_iter().map(|w| w / total).collect()
}

/// Decay- and strength-weighted outcome probabilities over a trailing window.
///
/// A side win adds `w * (0.5 + 0.5 f)` to the winner; a tie adds
/// `w * (0.4 + 0.6 (1 - f))` to the tie score, with `f` the strength factor.
pub fn estimate_probabilities(
    window: &[ClassifiedRound],
    config: &AnalyzerConfig,
) -> ProbabilityEstimate {
    if window.is_empty() {
        return ProbabilityEstimate::NEUTRAL;
    }

    let weights = decay_weights(window.len(), config.decay);
    let mut scores = [0.0f64; 3];
    for (round, weight) in window.iter().zip(&weights) {
        let factor = round.strength_factor(config);
        let contribution = match round.outcome {
            Outcome::Tie => weight * (0.4 + 0.6 * (1.0 - factor)),
            _ => weight * (0.5 + 0.5 * factor),
        };
        scores[round.outcome.index()] += contribution;
    }

    let total: f64 = scores.iter().sum();
    if total <= 0.0 {
        return ProbabilityEstimate::NEUTRAL;
    }

    let peak = scores.iter().copied().fold(0.0, f64::max) / total;
    let confidence = peak.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) * 100.0;

    ProbabilityEstimate {
        side_a: percent(scores[Outcome::SideA.index()], total),
        side_b: percent(scores[Outcome::SideB.index()], total),
        tie: percent(scores[Outcome::Tie.index()], total),
        confidence: round_tenth(confidence),
    }
}

fn percent(score: f64, total: f64) -> f64 {
    round_tenth(score / total * 100.0)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::classify_rounds;
    use crate::model::history::History;
    use crate::model::rank::Rank;

    fn classified(pairs: &[(Rank, Rank)]) -> Vec<ClassifiedRound> {
        let history: History = pairs.iter().copied().collect();
        classify_rounds(history.rounds(), &AnalyzerConfig::default())
    }

    #[test]
    fn empty_window_returns_neutral_baseline() {
        let estimate = estimate_probabilities(&[], &AnalyzerConfig::default());
        assert_eq!(estimate, ProbabilityEstimate::NEUTRAL);
        assert_eq!(estimate.side_a + estimate.side_b + estimate.tie, 100.0);
    }

    #[test]
    fn weights_favor_recent_rounds_and_sum_to_one() {
        let weights = decay_weights(4, 0.85);
        assert_eq!(weights.len(), 4);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(weights.windows(2).all(|w| w[0] < w[1]));
        assert!((weights[2] / weights[3] - 0.85).abs() < 1e-12);
    }

    #[test]
    fn all_side_a_window_favors_side_a() {
        let window = classified(&[
            (Rank::King, Rank::Two),
            (Rank::Nine, Rank::Three),
            (Rank::Four, Rank::Two),
        ]);
        let estimate = estimate_probabilities(&window, &AnalyzerConfig::default());
        assert!(estimate.side_a > estimate.side_b);
        assert_eq!(estimate.side_a, 100.0);
        assert_eq!(estimate.confidence, 99.0);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let window = classified(&[
            (Rank::King, Rank::Two),
            (Rank::Three, Rank::Nine),
            (Rank::Five, Rank::Five),
            (Rank::Ace, Rank::Jack),
            (Rank::Two, Rank::Seven),
            (Rank::Eight, Rank::Eight),
        ]);
        let estimate = estimate_probabilities(&window, &AnalyzerConfig::default());
        let sum = estimate.side_a + estimate.side_b + estimate.tie;
        assert!((sum - 100.0).abs() <= 0.2, "sum = {sum}");
        assert!((5.0..=99.0).contains(&estimate.confidence));
    }

    #[test]
    fn matches_hand_computed_two_round_window() {
        // Weights: [0.85, 1.0] / 1.85. Round 0: side B wins with a 7 (f = 0.4).
        // Round 1: tie (f = 0.3).
        let window = classified(&[(Rank::Two, Rank::Seven), (Rank::Six, Rank::Six)]);
        let estimate = estimate_probabilities(&window, &AnalyzerConfig::default());
        let w0: f64 = 0.85 / 1.85;
        let w1: f64 = 1.0 / 1.85;
        let side_b = w0 * (0.5 + 0.5 * 0.4);
        let tie = w1 * (0.4 + 0.6 * 0.7);
        let total = side_b + tie;
        assert_eq!(estimate.side_a, 0.0);
        assert_eq!(estimate.side_b, ((side_b / total * 100.0) * 10.0).round() / 10.0);
        assert_eq!(estimate.tie, ((tie / total * 100.0) * 10.0).round() / 10.0);
        assert_eq!(estimate.leading_side(), Outcome::SideB);
    }

    #[test]
    fn stronger_winning_cards_weigh_more() {
        // Same recency, opposite sides: the king outweighs the three.
        let window = classified(&[(Rank::King, Rank::Two), (Rank::Two, Rank::Three)]);
        let mut config = AnalyzerConfig::default();
        config.decay = 0.999_999;
        let estimate = estimate_probabilities(&window, &config);
        assert!(estimate.side_a > estimate.side_b);
    }

    #[test]
    fn confidence_clamps_low_end() {
        let estimate = ProbabilityEstimate::NEUTRAL;
        assert_eq!(estimate.confidence, 5.0);
        assert_eq!(estimate.of(Outcome::Tie), 2.0);
    }
}
