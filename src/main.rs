use anyhow::Context;
use clap::Parser;
use csdoclet::cli::Cli;
use csdoclet::generator::Generator;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default = if verbose { "csdoclet=debug" } else { "csdoclet=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let config = cli.load_config().context("Loading configuration")?;
    let summary = Generator::new(config, cli.generator_options())
        .run()
        .context("Doclet run failed")?;

    info!(
        "{} packages, {} rules, {} quickfixes, {} option providers; {} files written; {} errors, {} warnings",
        summary.packages,
        summary.rules,
        summary.quickfixes,
        summary.option_providers,
        summary.files_written,
        summary.errors,
        summary.warnings
    );
    Ok(summary.errors == 0)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
