//! Pedidos command-line interface

use std::process;

use clap::Parser;

mod cli;
mod config;
mod observability;

pub fn main() {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = observability::init_subscriber(&cli.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = cli.run() {
        eprintln!("{error}");
        process::exit(1);
    }
}
