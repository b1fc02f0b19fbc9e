use std::path::PathBuf;

use clap::{Parser, Subcommand};
use studio_core::config::ConfigProfile;

use crate::config::Overrides;

/// Round history analytics for two-sided card draws.
#[derive(Debug, Parser)]
#[command(
    name = "studio",
    author,
    version,
    about = "Pattern, probability and suggestion analytics over a round history"
)]
pub struct Cli {
    /// Path to the YAML configuration file (defaults apply when absent).
    #[arg(short, long, value_name = "FILE", default_value = "studio.yaml", global = true)]
    pub config: PathBuf,

    /// Override the session file.
    #[arg(long, value_name = "FILE", global = true)]
    pub session: Option<PathBuf>,

    /// Override the analysis window size (5-50).
    #[arg(long, value_name = "ROUNDS", global = true)]
    pub window: Option<usize>,

    /// Override the recency decay, strictly between 0 and 1.
    #[arg(long, value_name = "DECAY", global = true)]
    pub decay: Option<f64>,

    /// Rank convention profile: ace-high or ace-low.
    #[arg(long, value_name = "PROFILE", value_parser = parse_profile, global = true)]
    pub profile: Option<ConfigProfile>,

    /// Override the number of rounds accepted per day.
    #[arg(long, value_name = "COUNT", global = true)]
    pub daily_limit: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            session: self.session.clone(),
            window: self.window,
            decay: self.decay,
            profile: self.profile,
            daily_limit: self.daily_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Record a round: `add K 2` or `add K-2`.
    Add {
        #[arg(value_name = "SIDE_A")]
        side_a: String,
        #[arg(value_name = "SIDE_B")]
        side_b: Option<String>,
    },
    /// Record a tie with both sides showing RANK.
    Tie {
        #[arg(value_name = "RANK")]
        rank: String,
    },
    /// Clear the round history.
    Reset,
    /// List recorded rounds.
    History {
        /// Only the most recent N rounds.
        #[arg(long, value_name = "N")]
        tail: Option<usize>,
    },
    /// Run the analytics over the current history.
    Analyze {
        /// Print the analysis as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Write the history or a report to a file.
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },
    /// Print the effective configuration.
    Config {
        /// Only check that the configuration is valid.
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum ExportTarget {
    /// Every round as CSV.
    Csv {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Text report with the latest analysis and the last rounds.
    Report {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

fn parse_profile(value: &str) -> Result<ConfigProfile, String> {
    value
        .parse::<ConfigProfile>()
        .map_err(|err| err.to_string())
}
