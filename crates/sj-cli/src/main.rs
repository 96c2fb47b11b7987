use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sj_cli::commands::{auth, chart, edit, log, stats, whoami};
use sj_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout();
    match &cli.command {
        Some(Commands::Register {
            username,
            email,
            password,
        }) => auth::register(&mut stdout, &config, username, email, password)?,
        Some(Commands::Login { email, password }) => {
            auth::login(&mut stdout, &config, email, password)?;
        }
        Some(Commands::Logout) => auth::logout(&mut stdout, &config)?,
        Some(Commands::Whoami) => whoami::run(&mut stdout, &config)?,
        Some(Commands::Log {
            day,
            sleep,
            nap,
            summary,
        }) => log::run(&mut stdout, &config, *day, sleep, nap, summary)?,
        Some(Commands::Chart { json }) => chart::run(&mut stdout, &config, *json)?,
        Some(Commands::Stats { json }) => stats::run(&mut stdout, &config, *json)?,
        Some(Commands::Edit {
            date,
            hours,
            summary,
        }) => edit::run(&mut stdout, &config, *date, *hours, summary.clone())?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
