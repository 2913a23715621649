//! Treeforge CLI Binary
//!
//! Command-line interface for sketching file trees and exporting them as zip archives.

use anyhow::Context;
use clap::Parser;
use std::process;
use treeforge::logging::init_logging;
use treeforge::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut context = CliContext::new(cli.workspace.clone(), cli.config.clone(), cli.out.clone())
        .context("failed to load configuration")?;

    let logging = cli.logging_overrides(&context.config().logging);
    init_logging(&logging).context("failed to initialize logging")?;

    Ok(context.execute(&cli.command)?)
}
