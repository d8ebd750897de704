use anyhow::Result;
use clap::Parser;
use episode_renamer::cli::args::{Cli, Command};
use episode_renamer::cli::commands;
use episode_renamer::models::config::Config;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "episode_renamer=debug"
    } else {
        "episode_renamer=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    init_logging(cli.verbose || config.debug);

    match cli.command {
        Command::Plan {
            source,
            metadata,
            output,
        } => commands::plan::run(&source, &metadata, output, &config)?,
        Command::Execute { plan_file, dry_run } => commands::execute::run(&plan_file, dry_run)?,
    }

    Ok(())
}
