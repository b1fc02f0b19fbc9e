//! On-disk session persistence.
//!
//! The session file holds the round history plus the daily entry counter:
//!
//! ```text
//! { "version": 1, "rounds": [...], "daily": { "date": "2026-03-01", "count": 12 } }
//! ```
//!
//! A bare `[["K", "2"], ...]` pair list from older sessions is also read.
//! Every save goes to `<file>.tmp` first and is then renamed over the target.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use studio_core::config::AnalyzerConfig;
use studio_core::error::{CoreError, ValidationError};
use studio_core::model::{History, Rank, Round};
use studio_core::session::{HistorySnapshot, Session};
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyCounter {
    pub date: NaiveDate,
    pub count: u32,
}

impl DailyCounter {
    fn on(date: NaiveDate) -> Self {
        Self { date, count: 0 }
    }

    /// Count for `today`; a counter from an earlier day reads as zero.
    pub fn count_on(&self, today: NaiveDate) -> u32 {
        if self.date == today { self.count } else { 0 }
    }

    fn record(&mut self, today: NaiveDate) {
        if self.date != today {
            *self = Self::on(today);
        }
        self.count += 1;
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    #[serde(flatten)]
    history: HistorySnapshot,
    #[serde(default)]
    daily: Option<DailyCounter>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read session {path:?}: {source}")]
    Read {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to write session {path:?}: {source}")]
    Write {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to encode session {path:?}: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("session file {path:?} could not be restored: {source}")]
    Corrupt {
        #[source]
        source: CoreError,
        path: PathBuf,
    },
    #[error(transparent)]
    Config(#[from] ValidationError),
    #[error("daily limit of {limit} rounds reached for {date}")]
    DailyLimitReached { limit: u32, date: NaiveDate },
}

/// A [`Session`] bound to its file, rewritten after every change.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    daily_limit: Option<u32>,
    daily: Option<DailyCounter>,
    session: Session,
}

impl SessionStore {
    /// Opens `path`, starting from an empty history when the file is absent.
    pub fn open(
        path: impl Into<PathBuf>,
        config: AnalyzerConfig,
        daily_limit: Option<u32>,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        let (history, daily) = match fs::read_to_string(&path) {
            Ok(text) => {
                let file = parse_session_file(&text).map_err(|source| StoreError::Corrupt {
                    source,
                    path: path.clone(),
                })?;
                let history = file
                    .history
                    .restore()
                    .map_err(|source| StoreError::Corrupt {
                        source,
                        path: path.clone(),
                    })?;
                (history, file.daily)
            }
            Err(source) if source.kind() == ErrorKind::NotFound => Default::default(),
            Err(source) => return Err(StoreError::Read { source, path }),
        };

        event!(
            target: "studio_cli::store",
            Level::INFO,
            path = %path.display(),
            rounds = history.len(),
            "session loaded"
        );

        Ok(Self {
            session: Session::with_history(config, history)?,
            path,
            daily_limit,
            daily,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn daily_count(&self, today: NaiveDate) -> u32 {
        self.daily.map_or(0, |daily| daily.count_on(today))
    }

    pub fn add_round(&mut self, side_a: Rank, side_b: Rank) -> Result<Round, StoreError> {
        self.add_round_on(side_a, side_b, Local::now().date_naive())
    }

    /// Appends a round counted against `today`'s entry limit, then saves.
    /// Nothing changes in memory unless the save succeeds.
    pub fn add_round_on(
        &mut self,
        side_a: Rank,
        side_b: Rank,
        today: NaiveDate,
    ) -> Result<Round, StoreError> {
        if let Some(limit) = self.daily_limit {
            if self.daily_count(today) >= limit {
                event!(
                    target: "studio_cli::store",
                    Level::WARN,
                    limit,
                    date = %today,
                    "daily limit reached"
                );
                return Err(StoreError::DailyLimitReached { limit, date: today });
            }
        }

        let mut session = self.session.clone();
        let round = session.append_round(side_a, side_b).clone();
        let mut daily = self.daily.unwrap_or_else(|| DailyCounter::on(today));
        daily.record(today);
        self.commit(session, Some(daily))?;
        Ok(round)
    }

    /// Clears the history. The daily counter is kept.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let mut session = self.session.clone();
        session.reset_history();
        self.commit(session, self.daily)
    }

    fn commit(&mut self, session: Session, daily: Option<DailyCounter>) -> Result<(), StoreError> {
        write_session(&self.path, session.history(), daily)?;
        self.session = session;
        self.daily = daily;
        Ok(())
    }
}

fn write_session(
    path: &Path,
    history: &History,
    daily: Option<DailyCounter>,
) -> Result<(), StoreError> {
    let file = SessionFile {
        history: HistorySnapshot::capture(history),
        daily,
    };
    let json = serde_json::to_string_pretty(&file).map_err(|source| StoreError::Encode {
        source,
        path: path.to_path_buf(),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::Write {
            source,
            path: parent.to_path_buf(),
        })?;
    }
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, json).map_err(|source| StoreError::Write {
        source,
        path: tmp_path.clone(),
    })?;
    fs::rename(&tmp_path, path).map_err(|source| StoreError::Write {
        source,
        path: path.to_path_buf(),
    })?;

    event!(
        target: "studio_cli::store",
        Level::DEBUG,
        path = %path.display(),
        rounds = history.len(),
        "session saved"
    );
    Ok(())
}

/// Only a top-level array is read as the legacy pair list; any other
/// document must decode as a full session file.
fn parse_session_file(text: &str) -> Result<SessionFile, CoreError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if value.is_array() {
        return Ok(SessionFile {
            history: HistorySnapshot::from_json(text)?,
            daily: None,
        });
    }
    Ok(serde_json::from_value(value)?)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
