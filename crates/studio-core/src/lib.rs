#![deny(warnings)]
pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod session;

pub use analysis::{Analysis, analyze};
pub use config::{AnalyzerConfig, ConfigProfile};
pub use error::{CoreError, ValidationError};
pub use model::{History, Outcome, Rank, RankConvention, Round, ValueClass};
pub use session::{HistorySnapshot, Session};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "studio-analyzer"
    }

    pub const fn codename() -> &'static str {
        "Round Reader"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "studio-analyzer");
        assert_eq!(AppInfo::codename(), "Round Reader");
        assert!(!AppInfo::version().is_empty());
    }
}
