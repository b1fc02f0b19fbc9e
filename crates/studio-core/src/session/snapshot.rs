use crate::error::CoreError;
use crate::model::history::History;
use crate::model::rank::Rank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredRound {
    pub side_a: String,
    pub side_b: String,
    pub timestamp: DateTime<Utc>,
}

/// Persisted form of a [`History`]. Round indices are not stored; they are
/// rebuilt from position on restore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistorySnapshot {
    pub version: u32,
    pub rounds: Vec<StoredRound>,
}

/// Accepts both the versioned document and a bare `[[a, b], ...]` pair list.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Versioned(HistorySnapshot),
    LegacyPairs(Vec<(String, String)>),
}

impl HistorySnapshot {
    pub fn capture(history: &History) -> Self {
        HistorySnapshot {
            version: SNAPSHOT_VERSION,
            rounds: history
                .iter()
                .map(|round| StoredRound {
                    side_a: round.side_a().symbol().to_string(),
                    side_b: round.side_b().symbol().to_string(),
                    timestamp: round.timestamp(),
                })
                .collect(),
        }
    }

    pub fn restore(self) -> Result<History, CoreError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CoreError::UnsupportedVersion(self.version));
        }
        let mut history = History::new();
        for stored in self.rounds {
            let side_a: Rank = stored.side_a.parse()?;
            let side_b: Rank = stored.side_b.parse()?;
            history.append_at(side_a, side_b, stored.timestamp);
        }
        Ok(history)
    }

    pub fn to_json(history: &History) -> serde_json::Result<String> {
        let snapshot = Self::capture(history);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let document: SnapshotDocument = serde_json::from_str(json)?;
        match document {
            SnapshotDocument::Versioned(snapshot) => Ok(snapshot),
            SnapshotDocument::LegacyPairs(pairs) => {
                let loaded_at = Utc::now();
                Ok(HistorySnapshot {
                    version: SNAPSHOT_VERSION,
                    rounds: pairs
                        .into_iter()
                        .map(|(side_a, side_b)| StoredRound {
                            side_a,
                            side_b,
                            timestamp: loaded_at,
                        })
                        .collect(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_symbols_as_strings() {
        let history: History = [(Rank::Ten, Rank::Ace)].into_iter().collect();
        let json = HistorySnapshot::to_json(&history).unwrap();
        assert!(json.contains("\"version\": 1"));
        assert!(json.contains("\"side_a\": \"10\""));
        assert!(json.contains("\"side_b\": \"A\""));
        assert!(!json.contains("\"index\""));
    }

    #[test]
    fn roundtrip_preserves_pairs_and_timestamps() {
        let history: History = [
            (Rank::King, Rank::Two),
            (Rank::Five, Rank::Five),
            (Rank::Jack, Rank::Queen),
        ]
        .into_iter()
        .collect();
        let json = HistorySnapshot::to_json(&history).unwrap();
        let restored = HistorySnapshot::from_json(&json)
            .unwrap()
            .restore()
            .unwrap();
        assert_eq!(restored, history);
    }

    #[test]
    fn legacy_pair_list_is_accepted() {
        let snapshot = HistorySnapshot::from_json(r#"[["K", "2"], ["q", "10"]]"#).unwrap();
        let history = snapshot.restore().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.rounds()[1].pair(), (Rank::Queen, Rank::Ten));
        assert_eq!(history.rounds()[1].index(), 1);
    }

    #[test]
    fn unknown_symbol_is_rejected_on_restore() {
        let snapshot = HistorySnapshot::from_json(r#"[["K", "Z"]]"#).unwrap();
        let err = snapshot.restore().unwrap_err();
        assert!(matches!(err, CoreError::InvalidRank { symbol } if symbol == "Z"));
    }

    #[test]
    fn newer_version_is_refused() {
        let json = r#"{ "version": 9, "rounds": [] }"#;
        let err = HistorySnapshot::from_json(json).unwrap().restore().unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedVersion(9)));
    }

    #[test]
    fn malformed_json_surfaces_decode_error() {
        let err = HistorySnapshot::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }
}
