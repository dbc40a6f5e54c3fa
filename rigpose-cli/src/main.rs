//! Main entry point for the rigpose CLI

mod cli;
mod commands;
mod utils;

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::{Generator, generate};
use log::LevelFilter;
use std::io;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger; -v/-q override RUST_LOG
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = verbosity(cli.verbose, cli.quiet) {
        logger.filter_level(level);
    }
    logger.init();

    match cli.command {
        Commands::Info(args) => commands::info::execute(args),
        Commands::Pose(args) => commands::pose::execute(args),
        Commands::Simulate(args) => commands::simulate::execute(args),
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

/// Log level requested on the command line, if any
fn verbosity(verbose: u8, quiet: bool) -> Option<LevelFilter> {
    match verbose {
        0 if quiet => Some(LevelFilter::Error),
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
