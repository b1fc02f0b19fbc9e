use core::fmt;
use serde::{Deserialize, Serialize};

/// Result of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    SideA,
    SideB,
    Tie,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::SideA, Outcome::SideB, Outcome::Tie];

    pub const fn index(self) -> usize {
        match self {
            Outcome::SideA => 0,
            Outcome::SideB => 1,
            Outcome::Tie => 2,
        }
    }

    pub const fn is_side(self) -> bool {
        !matches!(self, Outcome::Tie)
    }

    /// The other side; a tie has no opposite.
    pub const fn opposite(self) -> Option<Outcome> {
        match self {
            Outcome::SideA => Some(Outcome::SideB),
            Outcome::SideB => Some(Outcome::SideA),
            Outcome::Tie => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::SideA => "side_a",
            Outcome::SideB => "side_b",
            Outcome::Tie => "tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::SideA => "Side A",
            Outcome::SideB => "Side B",
            Outcome::Tie => "Tie",
        };
        f.write_str(label)
    }
}

/// Coarse strength bucket of the winning rank. Ties carry `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueClass {
    High,
    Medium,
    Low,
    Neutral,
}

impl ValueClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueClass::High => "high",
            ValueClass::Medium => "medium",
            ValueClass::Low => "low",
            ValueClass::Neutral => "neutral",
        }
    }
}

impl fmt::Display for ValueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
