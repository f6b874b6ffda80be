#![deny(missing_docs)]

//! # apigen CLI
//!
//! Command Line Interface over the definition loader.
//!
//! Supported Commands:
//! - `dump`: Writes the static model dump of every definition and schema.
//! - `names`: Prints the assigned type, method and binding names as JSON.

use apigen_core::HttpFetcher;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::CliResult;

mod args;
mod dump;
mod error;
mod names;

#[derive(Parser, Debug)]
#[clap(author, version, about = "API and exchange reference loader")]
struct Cli {
    /// Enable debug logging (overridden by `RUST_LOG`).
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the static model dump of a load.
    Dump(dump::DumpArgs),
    /// Print the identifiers assigned by a load.
    Names(names::NamesArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "apigen=debug" } else { "apigen=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let fetcher = HttpFetcher::new();
    match &cli.command {
        Commands::Dump(args) => dump::execute(args, fetcher)?,
        Commands::Names(args) => names::execute(args, fetcher)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_manifest_flag_parses() {
        let cli = Cli::try_parse_from([
            "apigen",
            "-v",
            "names",
            "--manifest",
            "https://refs.example.com/manifest.json",
            "--no-builtin-patches",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Names(args) => {
                assert!(args.load.is_remote());
                assert!(args.load.no_builtin_patches);
                assert!(!args.compact);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
