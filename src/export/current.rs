//! Current order export
//!
//! The undiscounted listing of the cart being composed:
//!
//! ```text
//! Cliente: <name> (<id>)
//! Fecha: <D/M/YYYY>
//!
//! ID,Producto,Categoría,Precio Unitario,Cantidad,Total
//! <id>,<name>,<category>,<price>,<quantity>,<line total>
//! ,,,,,Subtotal,<subtotal>
//! ```

use jiff::Zoned;
use tracing::debug;

use crate::{
    cart::Cart,
    clock::{iso_date, locale_date},
    export::{ExportedFile, escape_name},
    pricing::{format_money, format_plain},
    users::User,
};

const HEADER: &str = "ID,Producto,Categoría,Precio Unitario,Cantidad,Total";

/// Render the cart for `user` as of `now`.
pub fn current_order(cart: &Cart, user: &User, now: &Zoned) -> ExportedFile {
    let mut rows = Vec::with_capacity(cart.len() + 5);

    rows.push(format!("Cliente: {} ({})", user.name, user.id));
    rows.push(format!("Fecha: {}", locale_date(now)));
    rows.push(String::new());
    rows.push(HEADER.to_string());

    rows.extend(cart.iter().map(|item| {
        format!(
            "{},{},{},{},{},{}",
            item.product.id,
            escape_name(&item.product.name),
            item.product.category,
            format_plain(item.product.price),
            item.quantity,
            format_money(item.line_total()),
        )
    }));

    rows.push(format!(",,,,,Subtotal,{}", format_money(cart.subtotal())));

    let filename = format!("Pedido_{}_{}.csv", user.id, iso_date(now));

    debug!(user_id = %user.id, lines = cart.len(), %filename, "rendered current order export");

    ExportedFile::from_rows(filename, &rows)
}
