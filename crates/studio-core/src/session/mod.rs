pub mod snapshot;

pub use snapshot::{HistorySnapshot, SNAPSHOT_VERSION, StoredRound};

use crate::analysis::{Analysis, analyze};
use crate::config::AnalyzerConfig;
use crate::error::{CoreError, ValidationError};
use crate::model::history::History;
use crate::model::rank::Rank;
use crate::model::round::Round;
use tracing::{Level, event};

/// A round history paired with the configuration that analyses it.
#[derive(Debug, Clone)]
pub struct Session {
    history: History,
    config: AnalyzerConfig,
}

impl Session {
    pub fn new(config: AnalyzerConfig) -> Result<Self, ValidationError> {
        Self::with_history(config, History::new())
    }

    pub fn with_history(config: AnalyzerConfig, history: History) -> Result<Self, ValidationError> {
        config.validate()?;
        event!(
            target: "studio_core::session",
            Level::DEBUG,
            rounds = history.len(),
            window = config.window_size,
            convention = config.rank_convention.as_str(),
            "session opened"
        );
        Ok(Self { history, config })
    }

    pub fn append_round(&mut self, side_a: Rank, side_b: Rank) -> &Round {
        self.history.append(side_a, side_b)
    }

    /// Parses both symbols before touching the history, so a bad symbol
    /// leaves the session unchanged.
    pub fn append_symbols(&mut self, side_a: &str, side_b: &str) -> Result<&Round, CoreError> {
        let side_a: Rank = side_a.parse()?;
        let side_b: Rank = side_b.parse()?;
        Ok(self.append_round(side_a, side_b))
    }

    pub fn reset_history(&mut self) {
        self.history.reset();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn analyze(&self) -> Analysis {
        analyze(&self.history, &self.config)
    }
}
