use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;
use seqstitch::cli::{run_assemble, run_graph, AssembleArgs, GraphArgs};
use shadow_rs::shadow;
use std::env;

shadow!(build);

#[derive(Debug, Parser)]
#[clap(
    name = "seqstitch",
    about = "Reconstruct sequences from short overlapping reads",
    version = build::PKG_VERSION,
    long_version = build::CLAP_LONG_VERSION
)]
struct Cli {
    /// Print extra debug logging information.
    #[clap(short, long, global = true)]
    verbose: bool,

    /// Unless there is an error, do not print logging information.
    #[clap(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assemble reads and write the reconstructed sequences.
    Assemble(AssembleArgs),
    /// Build the overlap graph and write it as CSV.
    Graph(GraphArgs),
}

fn set_log_level(cli: &Cli) -> Result<()> {
    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder.filter_level(log_level);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.try_init()?;
    log::debug!("seqstitch version {}", build::PKG_VERSION);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_log_level(&cli)?;

    match &cli.command {
        Command::Assemble(args) => run_assemble(args),
        Command::Graph(args) => run_graph(args),
    }
}
