use super::classifier::ClassifiedRound;
use crate::config::BreakRules;
use crate::model::outcome::ValueClass;
use core::fmt;
use serde::{Serialize, Serializer};

/// Why a break is expected on the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakReason {
    LowCluster { low: usize, lookback: usize },
    LastCardLow,
    AcceleratedAlternation { changes: usize, span: usize },
}

impl fmt::Display for BreakReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakReason::LowCluster { low, lookback } => {
                write!(f, "{low}/{lookback} low cards recently")
            }
            BreakReason::LastCardLow => f.write_str("last card low"),
            BreakReason::AcceleratedAlternation { .. } => {
                f.write_str("accelerated alternation (high break/tie risk)")
            }
        }
    }
}

impl Serialize for BreakReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BreakSignal {
    pub expected: bool,
    pub reason: Option<BreakReason>,
}

impl BreakSignal {
    const fn with_reason(reason: BreakReason) -> Self {
        Self {
            expected: true,
            reason: Some(reason),
        }
    }

    /// Human-readable justification; empty when no break is expected.
    pub fn reason_text(&self) -> String {
        self.reason.map(|r| r.to_string()).unwrap_or_default()
    }
}

/// Applies the ordered break rules to a trailing window. The first matching
/// rule decides.
pub fn predict_break(window: &[ClassifiedRound], rules: &BreakRules) -> BreakSignal {
    if window.is_empty() {
        return BreakSignal::default();
    }

    let recent_classes = tail(window, rules.low_lookback);
    let low = recent_classes
        .iter()
        .filter(|round| round.value_class == ValueClass::Low)
        .count();
    if low >= rules.low_threshold {
        return BreakSignal::with_reason(BreakReason::LowCluster {
            low,
            lookback: rules.low_lookback,
        });
    }

    if window
        .last()
        .is_some_and(|round| round.value_class == ValueClass::Low)
    {
        return BreakSignal::with_reason(BreakReason::LastCardLow);
    }

    let recent_outcomes = tail(window, rules.alternation_lookback);
    let span = recent_outcomes.len();
    if span >= rules.alternation_min_outcomes {
        let changes = recent_outcomes
            .windows(2)
            .filter(|pair| pair[0].outcome != pair[1].outcome)
            .count();
        if changes as f64 >= (span - 1) as f64 * rules.alternation_ratio {
            return BreakSignal::with_reason(BreakReason::AcceleratedAlternation { changes, span });
        }
    }

    BreakSignal::default()
}

fn tail(rounds: &[ClassifiedRound], count: usize) -> &[ClassifiedRound] {
    &rounds[rounds.len().saturating_sub(count)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::outcome::Outcome::{self, SideA as A, SideB as B, Tie as T};
    use crate::model::outcome::ValueClass::{High as H, Low as L, Medium as M, Neutral as N};

    fn rounds(pairs: &[(Outcome, ValueClass)]) -> Vec<ClassifiedRound> {
        pairs
            .iter()
            .enumerate()
            .map(|(index, (outcome, value_class))| ClassifiedRound {
                index,
                outcome: *outcome,
                value_class: *value_class,
                winning_rank: None,
            })
            .collect()
    }

    #[test]
    fn empty_window_expects_nothing() {
        let signal = predict_break(&[], &BreakRules::default());
        assert!(!signal.expected);
        assert_eq!(signal.reason_text(), "");
    }

    #[test]
    fn three_lows_in_last_five_cite_count() {
        let window = rounds(&[(A, H), (A, L), (B, L), (A, M), (A, L), (A, H)]);
        let signal = predict_break(&window, &BreakRules::default());
        assert!(signal.expected);
        assert_eq!(
            signal.reason,
            Some(BreakReason::LowCluster {
                low: 3,
                lookback: 5
            })
        );
        assert_eq!(signal.reason_text(), "3/5 low cards recently");
    }

    #[test]
    fn low_cluster_uses_whole_window_when_short() {
        let window = rounds(&[(A, L), (B, L), (A, L)]);
        let signal = predict_break(&window, &BreakRules::default());
        assert!(matches!(
            signal.reason,
            Some(BreakReason::LowCluster { low: 3, .. })
        ));
    }

    #[test]
    fn last_card_low_triggers_second_rule() {
        let window = rounds(&[(A, H), (A, H), (A, L)]);
        let signal = predict_break(&window, &BreakRules::default());
        assert_eq!(signal.reason, Some(BreakReason::LastCardLow));
        assert_eq!(signal.reason_text(), "last card low");
    }

    #[test]
    fn accelerated_alternation_needs_four_outcomes() {
        let rules = BreakRules::default();
        let short = rounds(&[(A, H), (B, H), (A, H)]);
        assert!(!predict_break(&short, &rules).expected);

        let alternating = rounds(&[(A, H), (B, M), (A, H), (B, M)]);
        let signal = predict_break(&alternating, &rules);
        assert_eq!(
            signal.reason,
            Some(BreakReason::AcceleratedAlternation { changes: 3, span: 4 })
        );
    }

    #[test]
    fn alternation_ratio_is_inclusive() {
        // Six outcomes, four changes: 4 >= 5 * 0.75 holds.
        let window = rounds(&[(A, H), (B, H), (B, H), (A, H), (T, N), (A, H)]);
        let signal = predict_break(&window, &BreakRules::default());
        assert!(matches!(
            signal.reason,
            Some(BreakReason::AcceleratedAlternation { changes: 4, span: 6 })
        ));
    }

    #[test]
    fn steady_high_run_expects_nothing() {
        let window = rounds(&[(A, H), (A, H), (A, M), (A, H), (A, H), (B, H)]);
        let signal = predict_break(&window, &BreakRules::default());
        assert!(!signal.expected);
        assert!(signal.reason.is_none());
    }

    #[test]
    fn reason_serializes_as_text() {
        let signal = BreakSignal::with_reason(BreakReason::LastCardLow);
        let json = serde_json::to_string(&signal).unwrap();
        assert_eq!(json, r#"{"expected":true,"reason":"last card low"}"#);
    }
}
