use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use studio_core::analysis::{Analysis, classify_rounds};
use studio_core::config::AnalyzerConfig;
use studio_core::model::History;
use thiserror::Error;
use tracing::{Level, event};

/// Rounds listed at the bottom of a text report.
pub const REPORT_TAIL: usize = 50;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create {path:?}: {source}")]
    Create {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to write {path:?}: {source}")]
    Write {
        #[source]
        source: csv::Error,
        path: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct RoundRow {
    index: usize,
    side_a: &'static str,
    side_b: &'static str,
    winner: &'static str,
    value_class: &'static str,
    timestamp: String,
}

fn rows<'a>(
    history: &'a History,
    config: &'a AnalyzerConfig,
    tail: usize,
) -> impl Iterator<Item = RoundRow> + 'a {
    let rounds = history.tail(tail);
    rounds
        .iter()
        .zip(classify_rounds(rounds, config))
        .map(|(round, classified)| RoundRow {
            index: round.index(),
            side_a: round.side_a().symbol(),
            side_b: round.side_b().symbol(),
            winner: classified.outcome.as_str(),
            value_class: classified.value_class.as_str(),
            timestamp: round.timestamp().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
}

fn write_rows<W: Write>(
    out: W,
    history: &History,
    config: &AnalyzerConfig,
    tail: usize,
) -> Result<usize, csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    let mut written = 0;
    for row in rows(history, config, tail) {
        writer.serialize(row)?;
        written += 1;
    }
    if written == 0 {
        writer.write_record(["index", "side_a", "side_b", "winner", "value_class", "timestamp"])?;
    }
    writer.flush()?;
    Ok(written)
}

/// Writes the text report: the analysis summary followed by the last
/// [`REPORT_TAIL`] rounds as CSV.
pub fn write_report<W: Write>(
    mut out: W,
    analysis: &Analysis,
    history: &History,
    config: &AnalyzerConfig,
    generated_at: DateTime<Local>,
) -> Result<(), csv::Error> {
    writeln!(out, "Round history report")?;
    writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out)?;
    writeln!(out, "{analysis}")?;
    writeln!(out)?;
    writeln!(out, "Last {} rounds:", history.len().min(REPORT_TAIL))?;
    write_rows(&mut out, history, config, REPORT_TAIL)?;
    Ok(())
}

/// Every round as `index,side_a,side_b,winner,value_class,timestamp`.
pub fn export_csv(
    path: &Path,
    history: &History,
    config: &AnalyzerConfig,
) -> Result<usize, ExportError> {
    let file = create(path)?;
    let written = write_rows(BufWriter::new(file), history, config, history.len()).map_err(
        |source| ExportError::Write {
            source,
            path: path.to_path_buf(),
        },
    )?;
    event!(
        target: "studio_cli::export",
        Level::INFO,
        path = %path.display(),
        rows = written,
        "csv export written"
    );
    Ok(written)
}

pub fn export_report(
    path: &Path,
    analysis: &Analysis,
    history: &History,
    config: &AnalyzerConfig,
) -> Result<(), ExportError> {
    let file = create(path)?;
    let mut out = BufWriter::new(file);
    write_report(&mut out, analysis, history, config, Local::now())
        .and_then(|()| out.flush().map_err(csv::Error::from))
        .map_err(|source| ExportError::Write {
            source,
            path: path.to_path_buf(),
        })?;
    event!(
        target: "studio_cli::export",
        Level::INFO,
        path = %path.display(),
        rounds = history.len(),
        "report written"
    );
    Ok(())
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Create {
        source,
        path: path.to_path_buf(),
    })
}
