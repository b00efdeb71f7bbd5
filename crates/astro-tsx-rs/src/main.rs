//! astro-tsx-rs: print Astro components as TSX with source maps.

mod cli;
mod config;
mod error;
mod logger;
mod orchestrator;
mod output;

use clap::Parser;
use cli::Args;
use config::RunConfig;
use miette::Result;

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let config = RunConfig::from_args(&args)?;
    let summary = orchestrator::run(&config, &mut std::io::stdout().lock())?;

    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
