use crate::model::rank::Rank;
use crate::model::round::Round;
use chrono::{DateTime, Utc};
use tracing::{Level, event};

/// Append-only, chronologically ordered log of rounds.
///
/// `rounds()[i].index() == i` always holds. The only other mutation is a
/// full [`reset`](History::reset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    rounds: Vec<Round>,
}

impl History {
    pub const fn new() -> Self {
        Self { rounds: Vec::new() }
    }

    pub fn append(&mut self, side_a: Rank, side_b: Rank) -> &Round {
        self.append_at(side_a, side_b, Utc::now())
    }

    pub fn append_at(&mut self, side_a: Rank, side_b: Rank, timestamp: DateTime<Utc>) -> &Round {
        let index = self.rounds.len();
        self.rounds.push(Round::new(index, side_a, side_b, timestamp));
        event!(
            target: "studio_core::history",
            Level::TRACE,
            index,
            side_a = %side_a,
            side_b = %side_b,
            "round appended"
        );
        &self.rounds[index]
    }

    pub fn reset(&mut self) {
        let dropped = self.rounds.len();
        self.rounds.clear();
        event!(
            target: "studio_core::history",
            Level::DEBUG,
            dropped,
            "history reset"
        );
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn last(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// The trailing `count` rounds, clamped to what is available.
    pub fn tail(&self, count: usize) -> &[Round] {
        let start = self.rounds.len().saturating_sub(count);
        &self.rounds[start..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Round> {
        self.rounds.iter()
    }
}

impl FromIterator<(Rank, Rank)> for History {
    fn from_iter<I: IntoIterator<Item = (Rank, Rank)>>(pairs: I) -> Self {
        let mut history = History::new();
        for (side_a, side_b) in pairs {
            history.append(side_a, side_b);
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::History;
    use crate::model::rank::Rank;

    #[test]
    fn indices_track_positions() {
        let mut history = History::new();
        history.append(Rank::King, Rank::Two);
        history.append(Rank::Three, Rank::Three);
        let last = history.append(Rank::Five, Rank::Nine).clone();
        assert_eq!(last.index(), 2);
        for (position, round) in history.iter().enumerate() {
            assert_eq!(round.index(), position);
        }
    }

    #[test]
    fn tail_clamps_to_available_rounds() {
        let history: History = [(Rank::Ace, Rank::Two), (Rank::Four, Rank::Six)]
            .into_iter()
            .collect();
        assert_eq!(history.tail(15).len(), 2);
        assert_eq!(history.tail(1)[0].pair(), (Rank::Four, Rank::Six));
        assert!(History::new().tail(5).is_empty());
    }

    #[test]
    fn reset_empties_and_restarts_indexing() {
        let mut history: History = [(Rank::Ace, Rank::Two)].into_iter().collect();
        history.reset();
        assert!(history.is_empty());
        assert!(history.last().is_none());
        assert_eq!(history.append(Rank::Jack, Rank::Queen).index(), 0);
    }
}
