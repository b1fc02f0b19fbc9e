use super::breaks::BreakSignal;
use super::classifier::ClassifiedRound;
use super::probability::ProbabilityEstimate;
use crate::config::SuggestionThresholds;
use crate::model::outcome::Outcome;
use core::cmp::Ordering;
use core::fmt;
use serde::{Serialize, Serializer};
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    BetSideA,
    BetSideB,
    BetTie,
    Wait,
}

impl Suggestion {
    pub const fn bet_on(outcome: Outcome) -> Self {
        match outcome {
            Outcome::SideA => Suggestion::BetSideA,
            Outcome::SideB => Suggestion::BetSideB,
            Outcome::Tie => Suggestion::BetTie,
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Suggestion::BetSideA => "bet Side A",
            Suggestion::BetSideB => "bet Side B",
            Suggestion::BetTie => "bet Tie",
            Suggestion::Wait => "wait (no safe entry)",
        };
        f.write_str(text)
    }
}

/// Which row of the decision table produced the suggestion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rationale {
    BreakTieRisk { tie: f64 },
    BreakReversal { dominant: Outcome },
    BreakFallback,
    TieRisk { tie: f64 },
    ThresholdMet { probability: f64, threshold: f64 },
    BelowThreshold { probability: f64, threshold: f64 },
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rationale::BreakTieRisk { tie } => {
                write!(f, "break expected with tie at {tie:.1}%: high tie risk")
            }
            Rationale::BreakReversal { dominant } => {
                write!(f, "break expected: reversal against recent {dominant} dominance")
            }
            Rationale::BreakFallback => {
                f.write_str("break expected: no dominant side, following the higher probability")
            }
            Rationale::TieRisk { tie } => write!(f, "tie probability at {tie:.1}%"),
            Rationale::ThresholdMet {
                probability,
                threshold,
            } => write!(f, "{probability:.1}% meets the {threshold:.0}% threshold"),
            Rationale::BelowThreshold {
                probability,
                threshold,
            } => write!(f, "{probability:.1}% is below the {threshold:.0}% threshold"),
        }
    }
}

impl Serialize for Rationale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub suggestion: Suggestion,
    pub rationale: Rationale,
}

/// Everything the arbiter consumes.
#[derive(Debug, Clone, Copy)]
pub struct ArbiterInput<'a> {
    pub probabilities: &'a ProbabilityEstimate,
    pub break_signal: &'a BreakSignal,
    pub intensity_level: u8,
    /// Chronological history; only the tail is inspected.
    pub recent: &'a [ClassifiedRound],
}

pub fn arbitrate(input: &ArbiterInput<'_>, thresholds: &SuggestionThresholds) -> Recommendation {
    let probs = input.probabilities;
    let recommendation = if input.break_signal.expected {
        if probs.tie >= thresholds.tie {
            Recommendation {
                suggestion: Suggestion::BetTie,
                rationale: Rationale::BreakTieRisk { tie: probs.tie },
            }
        } else {
            match dominant_side(input.recent, thresholds.dominance_lookback, probs)
                .and_then(|side| side.opposite().map(|opposite| (side, opposite)))
            {
                Some((dominant, opposite)) => Recommendation {
                    suggestion: Suggestion::bet_on(opposite),
                    rationale: Rationale::BreakReversal { dominant },
                },
                None => Recommendation {
                    suggestion: Suggestion::bet_on(probs.leading_side()),
                    rationale: Rationale::BreakFallback,
                },
            }
        }
    } else if probs.tie >= thresholds.tie {
        Recommendation {
            suggestion: Suggestion::BetTie,
            rationale: Rationale::TieRisk { tie: probs.tie },
        }
    } else {
        let candidate = probs.leading_side();
        let probability = probs.of(candidate);
        let threshold = thresholds.side_threshold(input.intensity_level);
        if probability >= threshold {
            Recommendation {
                suggestion: Suggestion::bet_on(candidate),
                rationale: Rationale::ThresholdMet {
                    probability,
                    threshold,
                },
            }
        } else {
            Recommendation {
                suggestion: Suggestion::Wait,
                rationale: Rationale::BelowThreshold {
                    probability,
                    threshold,
                },
            }
        }
    };

    event!(
        target: "studio_core::suggestion",
        Level::DEBUG,
        suggestion = ?recommendation.suggestion,
        rationale = %recommendation.rationale,
        break_expected = input.break_signal.expected,
        intensity = input.intensity_level
    );
    recommendation
}

/// Side with the larger count over the last `lookback` rounds.
///
/// `None` when the sides are level or ties outnumber the leading side. When
/// ties match the leading side's count, the higher probability decides.
pub fn dominant_side(
    rounds: &[ClassifiedRound],
    lookback: usize,
    probabilities: &ProbabilityEstimate,
) -> Option<Outcome> {
    let start = rounds.len().saturating_sub(lookback);
    let mut counts = [0usize; 3];
    for round in &rounds[start..] {
        counts[round.outcome.index()] += 1;
    }
    let side_a = counts[Outcome::SideA.index()];
    let side_b = counts[Outcome::SideB.index()];
    let tie = counts[Outcome::Tie.index()];

    let (side, count) = match side_a.cmp(&side_b) {
        Ordering::Greater => (Outcome::SideA, side_a),
        Ordering::Less => (Outcome::SideB, side_b),
        Ordering::Equal => return None,
    };
    match count.cmp(&tie) {
        Ordering::Greater => Some(side),
        Ordering::Equal if probabilities.of(side) >= probabilities.tie => Some(side),
        _ => None,
    }
}
