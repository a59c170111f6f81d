//! `vacancies`: collect hh.ru postings into a JSON catalog and browse it.

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;
use common::config::Settings;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    let cli = cli::args::Cli::parse();

    let settings = Settings::load().context("load settings")?;
    common::logging::init(&settings.telemetry).context("init logging")?;
    tracing::debug!(?cli, "parsed cli");

    cli::commands::run(cli, settings)
}
