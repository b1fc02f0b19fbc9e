use crate::config::AnalyzerConfig;
use crate::error::CoreError;
use crate::model::outcome::{Outcome, ValueClass};
use crate::model::rank::Rank;
use crate::model::round::Round;
use serde::Serialize;

/// A round reduced to what the analytics consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassifiedRound {
    pub index: usize,
    pub outcome: Outcome,
    pub value_class: ValueClass,
    pub winning_rank: Option<Rank>,
}

impl ClassifiedRound {
    /// Strength factor in [0, 1]; ties use the configured tie strength.
    pub fn strength_factor(&self, config: &AnalyzerConfig) -> f64 {
        match self.winning_rank {
            Some(rank) => config.strength.factor(rank),
            None => config.tie_strength,
        }
    }
}

pub fn classify(round: &Round, config: &AnalyzerConfig) -> ClassifiedRound {
    let convention = config.rank_convention;
    let outcome = round.outcome(convention);
    let winning_rank = round.winning_rank(convention);
    let value_class = winning_rank
        .map(|rank| config.partition.class_of(rank))
        .unwrap_or(ValueClass::Neutral);

    ClassifiedRound {
        index: round.index(),
        outcome,
        value_class,
        winning_rank,
    }
}

pub fn classify_rounds(rounds: &[Round], config: &AnalyzerConfig) -> Vec<ClassifiedRound> {
    rounds.iter().map(|round| classify(round, config)).collect()
}

/// Classify a raw pair of rank symbols without touching any history.
pub fn classify_symbols(
    side_a: &str,
    side_b: &str,
    config: &AnalyzerConfig,
) -> Result<(Outcome, ValueClass), CoreError> {
    let side_a: Rank = side_a.parse()?;
    let side_b: Rank = side_b.parse()?;
    let round = Round::new(0, side_a, side_b, chrono::Utc::now());
    let classified = classify(&round, config);
    Ok((classified.outcome, classified.value_class))
}
