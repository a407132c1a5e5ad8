//! oerec - command line front end for the OpenEngine record contract
//!
//! oerec provides:
//! - Structural checks of search result and favicon documents
//! - Normalization to canonical (or snake_case) keys
//! - Projection of search results onto url/favicon pairs
//! - A listing of the declared fields

use anyhow::Result;
use clap::Parser;

mod cli;

fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.quiet, cli.verbose);
    cli::run(cli)
}
