use crate::model::outcome::Outcome;
use crate::model::rank::{Rank, RankConvention};
use chrono::{DateTime, Utc};
use core::cmp::Ordering;
use core::fmt;
use serde::Serialize;

/// One comparison between the two sides' drawn ranks.
///
/// Rounds are created by [`History`](crate::model::History) only, which keeps
/// `index` equal to the round's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    index: usize,
    side_a: Rank,
    side_b: Rank,
    timestamp: DateTime<Utc>,
}

impl Round {
    pub(crate) const fn new(
        index: usize,
        side_a: Rank,
        side_b: Rank,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            index,
            side_a,
            side_b,
            timestamp,
        }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn side_a(&self) -> Rank {
        self.side_a
    }

    pub const fn side_b(&self) -> Rank {
        self.side_b
    }

    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub const fn pair(&self) -> (Rank, Rank) {
        (self.side_a, self.side_b)
    }

    pub fn outcome(&self, convention: RankConvention) -> Outcome {
        match convention.compare(self.side_a, self.side_b) {
            Ordering::Greater => Outcome::SideA,
            Ordering::Less => Outcome::SideB,
            Ordering::Equal => Outcome::Tie,
        }
    }

    /// Rank held by the winning side, `None` on a tie.
    pub fn winning_rank(&self, convention: RankConvention) -> Option<Rank> {
        match self.outcome(convention) {
            Outcome::SideA => Some(self.side_a),
            Outcome::SideB => Some(self.side_b),
            Outcome::Tie => None,
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}-{}", self.index, self.side_a, self.side_b)
    }
}

#[cfg(test)]
mod tests {
    use super::Round;
    use crate::model::outcome::Outcome;
    use crate::model::rank::{Rank, RankConvention};
    use chrono::Utc;

    fn round(a: Rank, b: Rank) -> Round {
        Round::new(0, a, b, Utc::now())
    }

    #[test]
    fn equal_ranks_tie_under_both_conventions() {
        for convention in [RankConvention::AceHigh, RankConvention::AceLow] {
            for rank in Rank::ALL {
                let r = round(rank, rank);
                assert_eq!(r.outcome(convention), Outcome::Tie);
                assert_eq!(r.winning_rank(convention), None);
            }
        }
    }

    #[test]
    fn outcome_is_antisymmetric() {
        for a in Rank::ALL {
            for b in Rank::ALL {
                let forward = round(a, b).outcome(RankConvention::AceHigh);
                let backward = round(b, a).outcome(RankConvention::AceHigh);
                match forward {
                    Outcome::Tie => assert_eq!(backward, Outcome::Tie),
                    side => assert_eq!(Some(backward), side.opposite()),
                }
            }
        }
    }

    #[test]
    fn ace_outcome_depends_on_convention() {
        let r = round(Rank::Ace, Rank::King);
        assert_eq!(r.outcome(RankConvention::AceHigh), Outcome::SideA);
        assert_eq!(r.outcome(RankConvention::AceLow), Outcome::SideB);
        assert_eq!(r.winning_rank(RankConvention::AceLow), Some(Rank::King));
    }

    #[test]
    fn display_shows_index_and_pair() {
        let r = Round::new(4, Rank::Ten, Rank::Jack, Utc::now());
        assert_eq!(r.to_string(), "#4 10-J");
    }
}
