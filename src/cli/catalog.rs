use clap::Args;
use pedidos::{catalog::Catalog, pricing::format_money};
use tabled::builder::Builder;

use crate::{cli::table, config::StorageConfig};

#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// Only products in this category ("Todos" for every category)
    #[arg(long)]
    category: Option<String>,

    /// Only products whose name or id contains this text
    #[arg(long, default_value = "")]
    search: String,
}

pub(crate) fn run(storage: &StorageConfig, args: &CatalogArgs) -> Result<(), String> {
    let catalog = Catalog::load(&storage.catalog)
        .map_err(|error| format!("failed to load catalog: {error}"))?;

    let products = catalog.filter_products(args.category.as_deref(), &args.search);

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Producto", "Categoría", "Unidad", "Precio"]);

    for product in products {
        builder.push_record([
            product.id.clone(),
            product.name.clone(),
            product.category.clone(),
            product.unit.clone(),
            format_money(product.price),
        ]);
    }

    println!("{}", table::render(builder, 4..5));

    Ok(())
}
