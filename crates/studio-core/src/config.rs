//! Analyzer configuration.
//!
//! Every heuristic constant lives here so deployments can pick a profile
//! instead of hard-coding one set of thresholds. Missing fields in a
//! serialized config fall back to the ace-high defaults.

use crate::error::ValidationError;
use crate::model::outcome::ValueClass;
use crate::model::rank::{Rank, RankConvention};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

pub const DEFAULT_WINDOW_SIZE: usize = 15;
pub const MIN_WINDOW_SIZE: usize = 5;
pub const MAX_WINDOW_SIZE: usize = 50;
pub const DEFAULT_DECAY: f64 = 0.85;
pub const MAX_STRENGTH: u8 = 5;

/// Named bundles of constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigProfile {
    /// Ace ranks above the king (2..=14).
    #[default]
    AceHigh,
    /// Ace ranks below the two (1..=13).
    AceLow,
}

impl FromStr for ConfigProfile {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "ace_high" | "high" | "default" => Ok(ConfigProfile::AceHigh),
            "ace_low" | "low" => Ok(ConfigProfile::AceLow),
            _ => Err(ValidationError::field(
                "profile",
                format!("unknown profile '{value}' (expected ace-high or ace-low)"),
            )),
        }
    }
}

impl ConfigProfile {
    pub const fn rank_convention(self) -> RankConvention {
        match self {
            ConfigProfile::AceHigh => RankConvention::AceHigh,
            ConfigProfile::AceLow => RankConvention::AceLow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Trailing rounds fed to break prediction and weighted probabilities.
    pub window_size: usize,
    /// Per-step recency decay for weighted probabilities, in (0, 1).
    pub decay: f64,
    pub rank_convention: RankConvention,
    pub partition: ValuePartition,
    pub strength: StrengthTable,
    /// Strength factor used in place of a winning rank on ties.
    pub tie_strength: f64,
    pub intensity: IntensityWeights,
    pub breaks: BreakRules,
    pub suggestion: SuggestionThresholds,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::from_profile(ConfigProfile::default())
    }
}

impl AnalyzerConfig {
    pub fn from_profile(profile: ConfigProfile) -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            decay: DEFAULT_DECAY,
            rank_convention: profile.rank_convention(),
            partition: ValuePartition::default(),
            strength: StrengthTable::default(),
            tie_strength: 0.3,
            intensity: IntensityWeights::default(),
            breaks: BreakRules::default(),
            suggestion: SuggestionThresholds::default(),
        }
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_WINDOW_SIZE..=MAX_WINDOW_SIZE).contains(&self.window_size) {
            return Err(ValidationError::field(
                "window_size",
                format!("must be between {MIN_WINDOW_SIZE} and {MAX_WINDOW_SIZE}"),
            ));
        }

        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(ValidationError::field(
                "decay",
                "must lie strictly between 0 and 1",
            ));
        }

        if !(0.0..=1.0).contains(&self.tie_strength) {
            return Err(ValidationError::field(
                "tie_strength",
                "must lie between 0 and 1",
            ));
        }

        self.partition.validate()?;
        self.strength.validate()?;
        self.intensity.validate()?;
        self.breaks.validate()?;
        self.suggestion.validate()?;
        Ok(())
    }
}

/// Split of the alphabet into value classes. Ranks listed in neither set are
/// `Low`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuePartition {
    pub high: Vec<Rank>,
    pub medium: Vec<Rank>,
}

impl Default for ValuePartition {
    fn default() -> Self {
        Self {
            high: vec![Rank::Ace, Rank::King, Rank::Queen, Rank::Jack],
            medium: vec![Rank::Ten, Rank::Nine, Rank::Eight],
        }
    }
}

impl ValuePartition {
    pub fn class_of(&self, rank: Rank) -> ValueClass {
        if self.high.contains(&rank) {
            ValueClass::High
        } else if self.medium.contains(&rank) {
            ValueClass::Medium
        } else {
            ValueClass::Low
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(rank) = self.high.iter().find(|rank| self.medium.contains(*rank)) {
            return Err(ValidationError::field(
                "partition",
                format!("rank {rank} is listed as both high and medium"),
            ));
        }
        Ok(())
    }
}

/// Strength level (1..=5) per rank. Unlisted ranks count as 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrengthTable {
    levels: BTreeMap<Rank, u8>,
}

impl Default for StrengthTable {
    fn default() -> Self {
        let levels = [
            (Rank::Ace, 5),
            (Rank::King, 5),
            (Rank::Queen, 5),
            (Rank::Jack, 4),
            (Rank::Ten, 4),
            (Rank::Nine, 3),
            (Rank::Eight, 3),
            (Rank::Seven, 2),
            (Rank::Six, 1),
            (Rank::Five, 1),
            (Rank::Four, 1),
            (Rank::Three, 1),
            (Rank::Two, 1),
        ];
        Self {
            levels: levels.into_iter().collect(),
        }
    }
}

impl StrengthTable {
    pub fn with_levels(levels: impl IntoIterator<Item = (Rank, u8)>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
        }
    }

    pub fn level(&self, rank: Rank) -> u8 {
        self.levels.get(&rank).copied().unwrap_or(1)
    }

    /// Level scaled into [0.2, 1.0].
    pub fn factor(&self, rank: Rank) -> f64 {
        f64::from(self.level(rank)) / f64::from(MAX_STRENGTH)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (rank, level) in &self.levels {
            if !(1..=MAX_STRENGTH).contains(level) {
                return Err(ValidationError::field(
                    "strength",
                    format!("level for {rank} must be between 1 and {MAX_STRENGTH}, got {level}"),
                ));
            }
        }
        Ok(())
    }
}

/// Coefficients of the linear intensity ("manipulation level") score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntensityWeights {
    pub low_run: f64,
    pub alternation: f64,
    pub high_rate: f64,
    /// Shortest run of low cards that counts as a low run.
    pub min_low_run: usize,
    pub min_level: u8,
    pub max_level: u8,
}

impl Default for IntensityWeights {
    fn default() -> Self {
        Self {
            low_run: 1.6,
            alternation: 3.0,
            high_rate: 1.6,
            min_low_run: 2,
            min_level: 1,
            max_level: 9,
        }
    }
}

impl IntensityWeights {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.min_level > self.max_level {
            return Err(ValidationError::field(
                "intensity.min_level",
                "must not exceed intensity.max_level",
            ));
        }
        if self.min_low_run == 0 {
            return Err(ValidationError::field(
                "intensity.min_low_run",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Ordered heuristics of the break predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakRules {
    pub low_lookback: usize,
    pub low_threshold: usize,
    pub alternation_lookback: usize,
    pub alternation_ratio: f64,
    pub alternation_min_outcomes: usize,
}

impl Default for BreakRules {
    fn default() -> Self {
        Self {
            low_lookback: 5,
            low_threshold: 3,
            alternation_lookback: 6,
            alternation_ratio: 0.75,
            alternation_min_outcomes: 4,
        }
    }
}

impl BreakRules {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.low_lookback == 0 || self.alternation_lookback == 0 {
            return Err(ValidationError::field(
                "breaks",
                "lookbacks must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.alternation_ratio) {
            return Err(ValidationError::field(
                "breaks.alternation_ratio",
                "must lie between 0 and 1",
            ));
        }
        if self.alternation_min_outcomes < 2 {
            return Err(ValidationError::field(
                "breaks.alternation_min_outcomes",
                "must be at least 2",
            ));
        }
        Ok(())
    }
}

/// Percent thresholds of the suggestion arbiter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionThresholds {
    pub tie: f64,
    pub side: f64,
    /// Side threshold once intensity reaches `cautious_level`.
    pub cautious_side: f64,
    pub cautious_level: u8,
    pub dominance_lookback: usize,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            tie: 12.0,
            side: 60.0,
            cautious_side: 66.0,
            cautious_level: 6,
            dominance_lookback: 5,
        }
    }
}

impl SuggestionThresholds {
    pub fn side_threshold(&self, intensity_level: u8) -> f64 {
        if intensity_level >= self.cautious_level {
            self.cautious_side
        } else {
            self.side
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("suggestion.tie", self.tie),
            ("suggestion.side", self.side),
            ("suggestion.cautious_side", self.cautious_side),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ValidationError::field(field, "must be a percentage"));
            }
        }
        if self.dominance_lookback == 0 {
            return Err(ValidationError::field(
                "suggestion.dominance_lookback",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
