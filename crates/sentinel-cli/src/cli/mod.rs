//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?;
    let ctx = commands::Context::resolve(&cli, config);

    match cli.command {
        Commands::Status(args) => commands::status::execute(ctx, args).await,
        Commands::StoreLog(args) => commands::store_log::execute(ctx, args).await,
        Commands::Report(args) => commands::report::execute(ctx, args).await,
        Commands::Simulate(args) => commands::simulate::execute(ctx, args),
        Commands::Config(args) => commands::config::execute(ctx, args),
    }
}

/// Logs go to stderr so `-o json` output stays machine-readable
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
