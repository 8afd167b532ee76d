//! c2clog - turn Caveman2Cosmos AI logs into game data

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use c2clog::cli::{Cli, Commands, ConfigCommands};
use c2clog::Config;

const DEFAULT_FILTER: &str = "c2clog=info";
const VERBOSE_FILTER: &str = "c2clog=debug";

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
        Commands::Config(ConfigCommands::Init) => commands::config::handle_init(config_path),
        Commands::Config(ConfigCommands::Show) => {
            let config = Config::load_from(config_path)?;
            commands::config::handle_show(&config, config_path)
        }
        Commands::Process {
            input,
            output,
            json_dir,
            no_json,
            no_eval,
        } => {
            let config = Config::load_from(config_path)?;
            init_logging(&config, cli.verbose);
            commands::process::handle(&config, input, output, json_dir, no_json, no_eval)
        }
        Commands::Summary { input } => {
            let config = Config::load_from(config_path)?;
            init_logging(&config, cli.verbose);
            commands::summary::handle(&config, input)
        }
    }
}

/// Install the stderr subscriber.
#[cfg(not(tarpaulin_include))]
fn init_logging(config: &Config, verbose: bool) {
    fmt()
        .with_env_filter(log_filter(config, verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// RUST_LOG, then `--verbose`, then the config filter, then the default.
fn log_filter(config: &Config, verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    if verbose {
        return EnvFilter::new(VERBOSE_FILTER);
    }
    match config.logging.filter.as_deref() {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid logging.filter {directive:?}: {e}");
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => EnvFilter::new(DEFAULT_FILTER),
    }
}
