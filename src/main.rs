//! Site-map builder entry point.

use std::process;

use clap::Parser;
use sitemap_builder::cli::{self, Args};
use sitemap_builder::{init_logging, BUILD_DATE, VERSION};

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_level, args.log_json) {
        eprintln!("{:#}", e);
        process::exit(2);
    }

    tracing::info!("Site-map builder {} ({})", VERSION, BUILD_DATE);
    tracing::debug!("Parsed arguments: {:?}", args);

    if let Err(e) = cli::run(&args) {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
