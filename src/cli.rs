//! CLI definitions for c2clog
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Build clap styles for the help output.
///
/// - Green: headers, usage, command names
/// - White: placeholders and valid values (light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "c2clog")]
#[command(about = "[ c2clog ] - turn Caveman2Cosmos AI logs into game data")]
#[command(
    long_about = "c2clog - Parse Civilization IV Caveman2Cosmos BBAI logs.

c2clog reads BBAI.log line by line, tracks turns, players, cities, unit
inventories and diplomacy, and writes an annotated copy of the log where
every line is prefixed with [turn|active player|category]. When
AiEvaluation.log sits next to it, unit evaluations are read in a second
pass and binned to turns using the timings from the first.

QUICK START:
    c2clog process Logs/BBAI.log         Annotate the log and export JSON/CSV
    c2clog summary Logs/BBAI.log         Print a per-player summary
    c2clog config init                   Write the default configuration

Logging goes to stderr. Set RUST_LOG (e.g. RUST_LOG=c2clog=debug) or
[logging].filter in the config file to change verbosity."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Use this config file instead of ~/.config/c2clog/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate a BBAI log and export the game data
    #[command(long_about = "Process a BBAI log and its AiEvaluation companion.

The annotated log is written next to the input (BBAI_processed.log by
default). Every input line produces exactly one output line:

    [<turn>|<active player id>|<category>] <text>

If AiEvaluation.log exists in the same directory it is processed after
the main log and copied verbatim to AiEvaluation_output.txt. JSON and CSV
exports go to the export directory next to the annotated log.

EXAMPLES:
    c2clog process                          Use ./BBAI.log
    c2clog process Logs/BBAI.log            Process a specific log
    c2clog process BBAI.log -o out.log      Choose the annotated output file
    c2clog process BBAI.log --json-dir out  Write exports to ./out
    c2clog process BBAI.log --no-json       Skip JSON and CSV exports
    c2clog process BBAI.log --no-eval       Skip AiEvaluation.log")]
    Process {
        /// Primary log file (defaults to the configured name in the current directory)
        #[arg(help = "Path to BBAI.log")]
        input: Option<PathBuf>,
        /// Annotated output file
        #[arg(long, short, value_name = "FILE", help = "Annotated output file")]
        output: Option<PathBuf>,
        /// Directory for JSON and CSV exports
        #[arg(long, value_name = "DIR", help = "Directory for JSON and CSV exports")]
        json_dir: Option<PathBuf>,
        /// Skip JSON and CSV exports
        #[arg(long, help = "Skip JSON and CSV exports")]
        no_json: bool,
        /// Skip the AiEvaluation.log pass
        #[arg(long, help = "Skip the AiEvaluation.log pass")]
        no_eval: bool,
    },

    /// Print a per-player summary of a BBAI log
    #[command(long_about = "Parse a BBAI log (and AiEvaluation.log when present) and
print one row per player: id, name, type, cities, last known population,
last score and number of unit evaluations, followed by run totals.

Nothing is written to disk.

EXAMPLE:
    c2clog summary Logs/BBAI.log")]
    Summary {
        /// Primary log file
        #[arg(help = "Path to BBAI.log")]
        input: Option<PathBuf>,
    },

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View and create the c2clog configuration file.

Configuration is stored in ~/.config/c2clog/config.toml and holds the log
file names, output locations, progress reporting and the log filter.

EXAMPLES:
    c2clog config show       Display the effective configuration
    c2clog config init       Write the defaults if no file exists"
    )]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Print a shell completion script to stdout.

EXAMPLES:
    c2clog completions bash > ~/.local/share/bash-completion/completions/c2clog
    c2clog completions zsh > ~/.zfunc/_c2clog")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

Values missing from the file are shown with their defaults.

EXAMPLE:
    c2clog config show")]
    Show,
    /// Write the default configuration file
    #[command(long_about = "Write the default configuration to the config file.

An existing file is left untouched.

EXAMPLE:
    c2clog config init
    c2clog --config ./c2clog.toml config init")]
    Init,
}
