use clap::{Args, Subcommand};
use pedidos::{
    catalog::Catalog,
    export::{deliver_or_log, order_summary},
    history::{OrderHistoryStore, OrderId},
    pricing::format_money,
    users::User,
};
use tabled::builder::Builder;
use tracing::warn;

use crate::{cli::table, config::StorageConfig};

#[derive(Debug, Args)]
pub(crate) struct HistoryCommand {
    #[command(subcommand)]
    command: HistorySubcommand,
}

#[derive(Debug, Subcommand)]
enum HistorySubcommand {
    /// List a user's stored orders, most recent first
    List(ListArgs),

    /// Export the summary of a stored order again
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Owner of the orders
    #[arg(long)]
    user: String,
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// Owner of the order
    #[arg(long)]
    user: String,

    /// Order id, e.g. ORD-482913
    #[arg(long)]
    order: String,
}

pub(crate) fn run(storage: &StorageConfig, command: HistoryCommand) -> Result<(), String> {
    match command.command {
        HistorySubcommand::List(args) => list(storage, &args),
        HistorySubcommand::Export(args) => export(storage, &args),
    }
}

fn list(storage: &StorageConfig, args: &ListArgs) -> Result<(), String> {
    let orders = storage.history().list_for_user(&args.user);

    if orders.is_empty() {
        println!("no orders found for user {}", args.user);
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Pedido", "Fecha", "Descuento", "Artículos", "Total"]);

    for order in orders {
        builder.push_record([
            order.id.to_string(),
            order.display_date.clone(),
            order.discount_type.to_string(),
            order.total_items().to_string(),
            format_money(order.total),
        ]);
    }

    println!("{}", table::render(builder, 3..5));

    Ok(())
}

fn export(storage: &StorageConfig, args: &ExportArgs) -> Result<(), String> {
    let order_id = OrderId::from(args.order.as_str());

    let order = storage
        .history()
        .find_for_user(&args.user, &order_id)
        .ok_or_else(|| format!("order {order_id} not found for user {}", args.user))?;

    // Orders outlive directory entries; fall back to the bare id.
    let user = match Catalog::load(&storage.catalog) {
        Ok(catalog) => catalog.user(&args.user).cloned(),
        Err(error) => {
            warn!(%error, "catalog unavailable, exporting with user id as name");
            None
        }
    }
    .unwrap_or_else(|| User::new(args.user.clone(), args.user.clone()));

    let file = order_summary(&order, &user);
    let mut sink = storage.sink();

    if deliver_or_log(&mut sink, &file) {
        println!("export: {}", sink.dir().join(&file.filename).display());
    } else {
        println!("export: not written, see log");
    }

    Ok(())
}
