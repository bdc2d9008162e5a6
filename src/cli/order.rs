use clap::Args;
use pedidos::{
    catalog::Catalog,
    discounts::DiscountTier,
    export::deliver_or_log,
    pricing::format_money,
    session::OrderSession,
};

use crate::config::StorageConfig;

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// User the order is for
    #[arg(long)]
    user: String,

    /// Product and quantity, as ID=QTY; repeat for more lines
    #[arg(long = "item", value_name = "ID=QTY", value_parser = parse_item, required = true)]
    items: Vec<(String, u32)>,

    /// Discount tier (normal, 20%, 30%)
    #[arg(long, default_value = "normal")]
    discount: String,

    /// Store the order in history and export its summary
    #[arg(long)]
    finalize: bool,
}

pub(crate) fn run(storage: &StorageConfig, args: OrderArgs) -> Result<(), String> {
    let catalog = Catalog::load(&storage.catalog)
        .map_err(|error| format!("failed to load catalog: {error}"))?;

    let user = catalog
        .user(&args.user)
        .cloned()
        .ok_or_else(|| format!("unknown user: {}", args.user))?;

    let clock = storage.clock().map_err(|error| error.to_string())?;
    let mut session = OrderSession::new(user, storage.history(), clock);

    for (id, quantity) in &args.items {
        let product = catalog
            .product(id)
            .ok_or_else(|| format!("unknown product: {id}"))?;

        session.upsert(product, *quantity);
    }

    session.set_discount(DiscountTier::parse(&args.discount));

    println!("items: {}", session.total_items());
    println!("subtotal: {}", format_money(session.subtotal()));
    println!("total: {}", format_money(session.discounted_total()));

    let mut sink = storage.sink();

    let export = if args.finalize {
        let finalized = session
            .finalize()
            .map_err(|error| format!("failed to finalize order: {error}"))?;

        println!("order_id: {}", finalized.order.id);

        finalized.export
    } else {
        session.export_current()
    };

    if deliver_or_log(&mut sink, &export) {
        println!("export: {}", sink.dir().join(&export.filename).display());
    } else {
        println!("export: not written, see log");
    }

    Ok(())
}

fn parse_item(value: &str) -> Result<(String, u32), String> {
    let (id, quantity) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got {value:?}"))?;

    let id = id.trim();

    if id.is_empty() {
        return Err(format!("missing product id in {value:?}"));
    }

    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid quantity in {value:?}: {error}"))?;

    Ok((id.to_string(), quantity))
}
