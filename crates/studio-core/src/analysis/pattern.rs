//! Named shapes in the tail of the outcome sequence.
//!
//! Rules are checked in precedence order and the first match wins. A rule
//! that needs more rounds than the history holds is skipped.

use super::classifier::ClassifiedRound;
use crate::model::outcome::{Outcome, ValueClass};
use core::fmt;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// Last three outcomes equal, none a tie.
    Streak,
    /// ABAB over the last four outcomes.
    Alternation,
    /// AA BB AA over the last six outcomes.
    Step,
    /// Value classes low, low, high over the last three rounds.
    ControlledBreak,
    Undefined,
}

impl Pattern {
    pub const fn as_str(self) -> &'static str {
        match self {
            Pattern::Streak => "streak",
            Pattern::Alternation => "alternation",
            Pattern::Step => "step",
            Pattern::ControlledBreak => "controlled break",
            Pattern::Undefined => "undefined",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn detect_pattern(rounds: &[ClassifiedRound]) -> Pattern {
    let outcomes: Vec<Outcome> = rounds.iter().map(|round| round.outcome).collect();
    let classes: Vec<ValueClass> = rounds.iter().map(|round| round.value_class).collect();

    if is_streak(&outcomes) {
        Pattern::Streak
    } else if is_alternation(&outcomes) {
        Pattern::Alternation
    } else if is_step(&outcomes) {
        Pattern::Step
    } else if is_controlled_break(&classes) {
        Pattern::ControlledBreak
    } else {
        Pattern::Undefined
    }
}

fn trailing<T>(items: &[T], count: usize) -> Option<&[T]> {
    items.len().checked_sub(count).map(|start| &items[start..])
}

fn is_streak(outcomes: &[Outcome]) -> bool {
    match trailing(outcomes, 3) {
        Some([a, b, c]) => a == b && b == c && a.is_side(),
        _ => false,
    }
}

fn is_alternation(outcomes: &[Outcome]) -> bool {
    match trailing(outcomes, 4) {
        Some([o1, o2, o3, o4]) => o4 == o2 && o3 == o1 && o4 != o3,
        _ => false,
    }
}

fn is_step(outcomes: &[Outcome]) -> bool {
    match trailing(outcomes, 6) {
        Some([a1, a2, b1, b2, c1, c2]) => a1 == a2 && b1 == b2 && c1 == c2 && a1 == c1,
        _ => false,
    }
}

fn is_controlled_break(classes: &[ValueClass]) -> bool {
    matches!(
        trailing(classes, 3),
        Some([ValueClass::Low, ValueClass::Low, ValueClass::High])
    )
}
