mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!(
        "🚀 ljcluster CLI v{} starting up.",
        env!("CARGO_PKG_VERSION")
    );
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let command_result = match cli.command {
        Commands::Build(args) => {
            info!("Dispatching to 'build' command.");
            commands::build::run(args)
        }
        Commands::Score(args) => {
            info!("Dispatching to 'score' command.");
            commands::score::run(args)
        }
        Commands::Energies(args) => {
            info!("Dispatching to 'energies' command.");
            commands::energies::run(args)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
