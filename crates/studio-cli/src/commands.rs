use std::io::Write;

use anyhow::{Context, Result};
use studio_core::model::Rank;

use crate::cli::{Command, ExportTarget};
use crate::config::CliConfig;
use crate::export::{export_csv, export_report};
use crate::store::SessionStore;

/// Runs one session command, writing user-facing output to `out`.
pub fn execute<W: Write>(command: &Command, store: &mut SessionStore, out: &mut W) -> Result<()> {
    match command {
        Command::Add { side_a, side_b } => {
            let (a, b) = match side_b {
                Some(side_b) => (side_a.parse::<Rank>()?, side_b.parse::<Rank>()?),
                None => Rank::parse_pair(side_a)?,
            };
            let round = store.add_round(a, b)?;
            writeln!(out, "Recorded {round}")?;
            print_analysis(store, out)?;
        }
        Command::Tie { rank } => {
            let rank: Rank = rank.parse()?;
            let round = store.add_round(rank, rank)?;
            writeln!(out, "Recorded tie {round}")?;
            print_analysis(store, out)?;
        }
        Command::Reset => {
            store.reset()?;
            writeln!(out, "History cleared.")?;
            print_analysis(store, out)?;
        }
        Command::History { tail } => {
            let history = store.session().history();
            let rounds = match tail {
                Some(count) => history.tail(*count),
                None => history.rounds(),
            };
            if rounds.is_empty() {
                writeln!(out, "No rounds recorded.")?;
            }
            for round in rounds {
                writeln!(
                    out,
                    "{round}  {}",
                    round.timestamp().format("%Y-%m-%d %H:%M:%S")
                )?;
            }
        }
        Command::Analyze { json } => {
            if *json {
                let analysis = store.session().analyze();
                serde_json::to_writer_pretty(&mut *out, &analysis)
                    .context("encoding analysis as JSON")?;
                writeln!(out)?;
            } else {
                print_analysis(store, out)?;
            }
        }
        Command::Export { target } => {
            let session = store.session();
            match target {
                ExportTarget::Csv { path } => {
                    let rows = export_csv(path, session.history(), session.config())?;
                    writeln!(out, "Exported {rows} rounds to {}", path.display())?;
                }
                ExportTarget::Report { path } => {
                    export_report(path, &session.analyze(), session.history(), session.config())?;
                    writeln!(out, "Report written to {}", path.display())?;
                }
            }
        }
        Command::Config { .. } => {
            anyhow::bail!("the config command does not operate on a session");
        }
    }
    Ok(())
}

/// Handles `config [--validate]`; the configuration is already validated.
pub fn show_config<W: Write>(config: &CliConfig, validate_only: bool, out: &mut W) -> Result<()> {
    if validate_only {
        writeln!(out, "Configuration is valid.")?;
    } else {
        let yaml = serde_yaml::to_string(config).context("encoding configuration as YAML")?;
        write!(out, "{yaml}")?;
    }
    Ok(())
}

fn print_analysis<W: Write>(store: &SessionStore, out: &mut W) -> Result<()> {
    writeln!(out, "{}", store.session().analyze())?;
    Ok(())
}
