use crate::error::CoreError;
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// One symbol of the 13-card alphabet.
///
/// The derived ordering is alphabet order (A, 2, ..., K). Comparing two
/// ranks for a round always goes through a [`RankConvention`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace = 1,
    #[serde(rename = "2")]
    Two = 2,
    #[serde(rename = "3")]
    Three = 3,
    #[serde(rename = "4")]
    Four = 4,
    #[serde(rename = "5")]
    Five = 5,
    #[serde(rename = "6")]
    Six = 6,
    #[serde(rename = "7")]
    Seven = 7,
    #[serde(rename = "8")]
    Eight = 8,
    #[serde(rename = "9")]
    Nine = 9,
    #[serde(rename = "10")]
    Ten = 10,
    #[serde(rename = "J")]
    Jack = 11,
    #[serde(rename = "Q")]
    Queen = 12,
    #[serde(rename = "K")]
    King = 13,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Position in [`Rank::ALL`].
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let trimmed = symbol.trim();
        Rank::ALL
            .iter()
            .copied()
            .find(|rank| rank.symbol().eq_ignore_ascii_case(trimmed))
    }

    /// Parses a `"RANK-RANK"` pair such as `"10-J"` into `(side_a, side_b)`.
    pub fn parse_pair(text: &str) -> Result<(Rank, Rank), CoreError> {
        let (side_a, side_b) = text
            .trim()
            .split_once('-')
            .ok_or_else(|| CoreError::invalid_rank(text))?;
        Ok((side_a.parse()?, side_b.parse()?))
    }
}

impl FromStr for Rank {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Rank::from_symbol(value).ok_or_else(|| CoreError::invalid_rank(value))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Integer value assigned to each rank when two sides are compared.
///
/// The conventions disagree on the ace: under `AceHigh` an ace beats a king,
/// under `AceLow` it loses to a two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankConvention {
    /// 2..=14 with the ace on top.
    #[default]
    AceHigh,
    /// 1..=13 with the ace at the bottom.
    AceLow,
}

impl RankConvention {
    pub const fn value(self, rank: Rank) -> u8 {
        match (self, rank) {
            (RankConvention::AceHigh, Rank::Ace) => 14,
            _ => rank as u8,
        }
    }

    pub fn compare(self, left: Rank, right: Rank) -> Ordering {
        self.value(left).cmp(&self.value(right))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RankConvention::AceHigh => "ace_high",
            RankConvention::AceLow => "ace_low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Rank, RankConvention};
    use core::cmp::Ordering;

    #[test]
    fn symbols_parse_case_insensitively() {
        assert_eq!("q".parse::<Rank>().unwrap(), Rank::Queen);
        assert_eq!(" 10 ".parse::<Rank>().unwrap(), Rank::Ten);
        assert_eq!(Rank::from_symbol("a"), Some(Rank::Ace));
    }

    #[test]
    fn out_of_alphabet_symbols_are_rejected() {
        for bad in ["1", "11", "T", "", "joker"] {
            assert!(bad.parse::<Rank>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn pairs_split_on_the_dash() {
        assert_eq!(Rank::parse_pair("10-J").unwrap(), (Rank::Ten, Rank::Jack));
        assert_eq!(Rank::parse_pair(" a-k ").unwrap(), (Rank::Ace, Rank::King));
        assert!(Rank::parse_pair("10J").is_err());
        assert!(Rank::parse_pair("10-Z").is_err());
    }

    #[test]
    fn display_matches_symbols() {
        assert_eq!(Rank::Queen.to_string(), "Q");
        assert_eq!(Rank::Ten.to_string(), "10");
        for rank in Rank::ALL {
            assert_eq!(Rank::from_symbol(&rank.to_string()), Some(rank));
        }
    }

    #[test]
    fn index_follows_alphabet_order() {
        for (idx, rank) in Rank::ALL.iter().enumerate() {
            assert_eq!(rank.index(), idx);
        }
    }

    #[test]
    fn conventions_disagree_only_on_the_ace() {
        assert_eq!(RankConvention::AceHigh.value(Rank::Ace), 14);
        assert_eq!(RankConvention::AceLow.value(Rank::Ace), 1);
        assert_eq!(
            RankConvention::AceHigh.compare(Rank::Ace, Rank::King),
            Ordering::Greater
        );
        assert_eq!(
            RankConvention::AceLow.compare(Rank::Ace, Rank::King),
            Ordering::Less
        );
        for rank in Rank::ALL.into_iter().filter(|r| *r != Rank::Ace) {
            assert_eq!(
                RankConvention::AceHigh.value(rank),
                RankConvention::AceLow.value(rank)
            );
        }
    }

    #[test]
    fn serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&Rank::Ten).unwrap(), "\"10\"");
        let parsed: Rank = serde_json::from_str("\"K\"").unwrap();
        assert_eq!(parsed, Rank::King);
    }
}
