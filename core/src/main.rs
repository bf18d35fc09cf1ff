use clap::Parser;
use dcmharvest_core::{harvest, Cli, TextReport};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to resolve root directory: {}", e);
            eprintln!("Error: Failed to resolve root directory: {}", e);
            process::exit(1);
        }
    };

    info!("Processing directory: {}", config.root.display());

    match harvest(config) {
        Ok(summary) => println!("{}", TextReport::new(&summary)),
        Err(e) => {
            error!("Harvest aborted: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}
