//! xtask - Build tasks for c2clog
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate documentation (man pages, COMMANDS.md)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, Command, CommandFactory, Parser, Subcommand};

use c2clog::cli::Cli;

const BIN: &str = "c2clog";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for c2clog")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate documentation from CLI definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,

        /// Generate man pages
        #[arg(long)]
        man: bool,

        /// Generate COMMANDS.md
        #[arg(long)]
        markdown: bool,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs {
            output,
            man,
            markdown,
        } => {
            // Neither flag means both
            let gen_all = !man && !markdown;

            if gen_all || man {
                generate_man_pages(&output)?;
            }
            if gen_all || markdown {
                generate_markdown(&output)?;
            }
        }
    }

    Ok(())
}

fn visible_subcommands(cmd: &Command) -> impl Iterator<Item = &Command> {
    cmd.get_subcommands().filter(|c| !c.is_hide_set())
}

fn render_man(cmd: &Command, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Generate man pages using clap_mangen
fn generate_man_pages(output: &Path) -> Result<()> {
    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let cmd = Cli::command();
    render_man(&cmd, &man_dir.join(format!("{BIN}.1")))?;

    for subcommand in visible_subcommands(&cmd) {
        let name = subcommand.get_name();
        render_man(subcommand, &man_dir.join(format!("{BIN}-{name}.1")))?;

        for nested in visible_subcommands(subcommand) {
            let nested_name = nested.get_name();
            render_man(nested, &man_dir.join(format!("{BIN}-{name}-{nested_name}.1")))?;
        }
    }

    println!("Man pages generated in {}", man_dir.display());
    Ok(())
}

fn is_builtin(arg: &Arg) -> bool {
    matches!(arg.get_id().as_str(), "help" | "version")
}

fn flag_label(arg: &Arg) -> Option<String> {
    let long = arg.get_long().map(|l| format!("--{l}"));
    let short = arg.get_short().map(|s| format!("-{s}"));
    match (short, long) {
        (Some(s), Some(l)) => Some(format!("{s}, {l}")),
        (Some(s), None) => Some(s),
        (None, Some(l)) => Some(l),
        (None, None) => None,
    }
}

/// Bullet list of a command's arguments, positional first.
fn render_args(cmd: &Command, markdown: &mut String, with_headings: bool) {
    let args: Vec<&Arg> = cmd.get_arguments().filter(|a| !is_builtin(a)).collect();
    let (positional, options): (Vec<&Arg>, Vec<&Arg>) =
        args.into_iter().partition(|a| a.is_positional());

    let help = |arg: &Arg| arg.get_help().map(|h| h.to_string()).unwrap_or_default();

    if !positional.is_empty() {
        if with_headings {
            markdown.push_str("### Arguments\n\n");
        }
        for arg in positional {
            let name = arg.get_id().as_str().to_uppercase();
            markdown.push_str(&format!("- `<{name}>`: {}\n", help(arg)));
        }
        markdown.push('\n');
    }

    let flags: Vec<(String, String)> = options
        .into_iter()
        .filter_map(|arg| flag_label(arg).map(|label| (label, help(arg))))
        .collect();
    if !flags.is_empty() {
        if with_headings {
            markdown.push_str("### Options\n\n");
        }
        for (label, help) in flags {
            markdown.push_str(&format!("- `{label}`: {help}\n"));
        }
        markdown.push('\n');
    }
}

fn push_code_block(markdown: &mut String, text: &str) {
    markdown.push_str("```\n");
    markdown.push_str(text);
    markdown.push_str("\n```\n\n");
}

/// Generate COMMANDS.md markdown documentation
fn generate_markdown(output: &Path) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let cmd = Cli::command();
    let mut markdown = String::new();

    markdown.push_str("# c2clog Command Reference\n\n");
    markdown.push_str("This document is auto-generated from the CLI definitions.\n\n");
    markdown.push_str("## Table of Contents\n\n");
    for subcommand in visible_subcommands(&cmd) {
        let name = subcommand.get_name();
        markdown.push_str(&format!("- [{name}](#{BIN}-{name})\n"));
    }
    markdown.push_str("\n---\n\n");

    markdown.push_str(&format!("## {BIN}\n\n"));
    if let Some(about) = cmd.get_about() {
        markdown.push_str(&format!("{about}\n\n"));
    }
    render_args(&cmd, &mut markdown, true);
    if let Some(long_about) = cmd.get_long_about() {
        push_code_block(&mut markdown, &long_about.to_string());
    }

    for subcommand in visible_subcommands(&cmd) {
        let name = subcommand.get_name();
        markdown.push_str(&format!("## {BIN} {name}\n\n"));
        if let Some(about) = subcommand.get_about() {
            markdown.push_str(&format!("{about}\n\n"));
        }
        render_args(subcommand, &mut markdown, true);

        if let Some(long_about) = subcommand.get_long_about() {
            markdown.push_str("### Description\n\n");
            push_code_block(&mut markdown, &long_about.to_string());
        }

        let nested: Vec<&Command> = visible_subcommands(subcommand).collect();
        if !nested.is_empty() {
            markdown.push_str("### Subcommands\n\n");
            for nested_cmd in nested {
                markdown.push_str(&format!("#### {BIN} {name} {}\n\n", nested_cmd.get_name()));
                if let Some(about) = nested_cmd.get_about() {
                    markdown.push_str(&format!("{about}\n\n"));
                }
                render_args(nested_cmd, &mut markdown, false);
                if let Some(long_about) = nested_cmd.get_long_about() {
                    push_code_block(&mut markdown, &long_about.to_string());
                }
            }
        }

        markdown.push_str("---\n\n");
    }

    markdown.push_str("\n*Generated by `cargo xtask gen-docs`*\n");

    let output_path = output.join("COMMANDS.md");
    fs::write(&output_path, markdown)?;
    println!("Generated: {}", output_path.display());

    Ok(())
}
