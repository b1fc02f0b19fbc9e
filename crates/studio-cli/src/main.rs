use anyhow::Context;
use clap::Parser;

use studio_cli::cli::{Cli, Command};
use studio_cli::commands::{execute, show_config};
use studio_cli::config::CliConfig;
use studio_cli::logging::init_logging;
use studio_cli::store::SessionStore;
use studio_core::AppInfo;
use tracing::{Level, event};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = CliConfig::load_or_default(&cli.config)?;
    config.apply(&cli.overrides());
    config.validate().with_context(|| {
        format!(
            "invalid settings after applying overrides to {}",
            cli.config.display()
        )
    })?;

    let _logging_guard = init_logging(&config.logging, &config.session.path)?;
    event!(
        target: "studio_cli",
        Level::INFO,
        app = AppInfo::name(),
        version = AppInfo::version(),
        session = %config.session.path.display(),
        "starting"
    );

    let mut stdout = std::io::stdout().lock();
    if let Command::Config { validate } = cli.command {
        return show_config(&config, validate, &mut stdout);
    }

    let mut store = SessionStore::open(
        config.session.path.clone(),
        config.analyzer.clone(),
        config.session.daily_limit,
    )?;
    execute(&cli.command, &mut store, &mut stdout)
}
