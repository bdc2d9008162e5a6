use clap::{Parser, Subcommand};

use crate::config::{LoggingConfig, StorageConfig};

mod catalog;
mod history;
mod order;
mod table;

#[derive(Debug, Parser)]
#[command(name = "pedidos", about = "Field order composition and export", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) storage: StorageConfig,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog products
    Catalog(catalog::CatalogArgs),

    /// Compose an order and export it
    Order(order::OrderArgs),

    /// Stored orders
    History(history::HistoryCommand),
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Catalog(args) => catalog::run(&self.storage, &args),
            Commands::Order(args) => order::run(&self.storage, args),
            Commands::History(command) => history::run(&self.storage, command),
        }
    }
}
