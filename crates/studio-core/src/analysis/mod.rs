//! Analytics pipeline over a round history.
//!
//! This module is composed of:
//! - `classifier`: outcome and value class per round.
//! - `pattern`: named shapes over the whole history.
//! - `transition`: first-order next-outcome forecast.
//! - `intensity`: bounded 1..=9 "manipulation level".
//! - `breaks`: break prediction over the trailing window.
//! - `probability`: decay-weighted probabilities over the trailing window.
//! - `suggestion`: the final recommendation.

pub mod breaks;
pub mod classifier;
pub mod intensity;
pub mod pattern;
pub mod probability;
pub mod suggestion;
pub mod transition;

pub use breaks::{BreakReason, BreakSignal, predict_break};
pub use classifier::{ClassifiedRound, classify, classify_rounds, classify_symbols};
pub use intensity::{IntensityScore, score_intensity};
pub use pattern::{Pattern, detect_pattern};
pub use probability::{ProbabilityEstimate, decay_weights, estimate_probabilities};
pub use suggestion::{
    ArbiterInput, Rationale, Recommendation, Suggestion, arbitrate, dominant_side,
};
pub use transition::{NextOutcomeForecast, TransitionMatrix, forecast_next};

use crate::config::AnalyzerConfig;
use crate::model::history::History;
use crate::model::outcome::Outcome;
use core::fmt;
use serde::Serialize;
use tracing::{Level, event};

/// One snapshot of every analytic for the current history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub rounds: usize,
    pub window: usize,
    pub pattern: Pattern,
    pub intensity: IntensityScore,
    pub break_signal: BreakSignal,
    pub probabilities: ProbabilityEstimate,
    pub transitions: Option<NextOutcomeForecast>,
    pub recommendation: Recommendation,
}

/// Runs the full pipeline. Pure given `(history, config)`.
pub fn analyze(history: &History, config: &AnalyzerConfig) -> Analysis {
    let classified = classify_rounds(history.rounds(), config);
    let window_start = classified.len().saturating_sub(config.window_size);
    let window = &classified[window_start..];

    let pattern = detect_pattern(&classified);
    let transitions = forecast_next(&classified);
    let intensity = score_intensity(&classified, &config.intensity);
    let break_signal = predict_break(window, &config.breaks);
    let probabilities = estimate_probabilities(window, config);
    let recommendation = arbitrate(
        &ArbiterInput {
            probabilities: &probabilities,
            break_signal: &break_signal,
            intensity_level: intensity.level,
            recent: &classified,
        },
        &config.suggestion,
    );

    event!(
        target: "studio_core::analysis",
        Level::DEBUG,
        rounds = classified.len(),
        window = window.len(),
        pattern = %pattern,
        intensity = intensity.level,
        break_expected = break_signal.expected,
        side_a = probabilities.side_a,
        side_b = probabilities.side_b,
        tie = probabilities.tie,
        suggestion = ?recommendation.suggestion,
        "analysis complete"
    );

    Analysis {
        rounds: classified.len(),
        window: window.len(),
        pattern,
        intensity,
        break_signal,
        probabilities,
        transitions,
        recommendation,
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rounds analysed: {} (window {})", self.rounds, self.window)?;
        writeln!(f, "Pattern: {}", self.pattern)?;
        writeln!(f, "Intensity level (1-9): {}", self.intensity.level)?;
        writeln!(
            f,
            "Suggestion: {} ({})",
            self.recommendation.suggestion, self.recommendation.rationale
        )?;
        if self.break_signal.expected {
            writeln!(f, "Break expected: {}", self.break_signal.reason_text())?;
        }
        writeln!(
            f,
            "Probabilities: Side A {:.1}%, Side B {:.1}%, Tie {:.1}%",
            self.probabilities.side_a, self.probabilities.side_b, self.probabilities.tie
        )?;
        write!(f, "Confidence: {:.1}%", self.probabilities.confidence)?;
        if let Some(forecast) = &self.transitions {
            let parts = Outcome::ALL
                .iter()
                .map(|outcome| format!("{outcome} {:.0}%", forecast.probability(*outcome) * 100.0))
                .collect::<Vec<_>>()
                .join(", ");
            write!(
                f,
                "\nAfter {} ({} observations): {parts}",
                forecast.given, forecast.observations
            )?;
        }
        Ok(())
    }
}
