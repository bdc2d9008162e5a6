//! Order summary export
//!
//! The printed document for a finalized order, used at finalize time and when
//! re-exporting from history. Every row starts with a blank first column.
//!
//! Line subtotals are recomputed from the unit price and the tier; the footer
//! uses the stored total. The two are not reconciled, so rounding can make the
//! lines and the footer differ by a cent.

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    export::{ExportedFile, escape_name},
    history::FinalizedOrder,
    pricing::format_money,
    users::User,
};

const LEAD: &str = " ,";

const LINES_HEADER: &str = "Codigo,Productos,Cantidad,Precio Unitario,Subtotal,Descuento";

/// Share of the total printed as the collection amount.
pub fn collection_rate() -> Decimal {
    Decimal::new(2, 2)
}

/// Flat amount printed as the next collection.
pub fn next_collection() -> Decimal {
    Decimal::new(500, 2)
}

/// Render `order` for its owner `user`.
pub fn order_summary(order: &FinalizedOrder, user: &User) -> ExportedFile {
    let multiplier = order.discount_type.multiplier();
    let total = order.total;

    let mut rows: Vec<String> = Vec::with_capacity(order.cart.len() + 13);

    rows.push("Cliente".to_string());
    rows.push(user.name.clone());
    rows.push("Codigo".to_string());
    rows.push(user.id.clone());
    rows.push(LINES_HEADER.to_string());

    rows.extend(order.cart.iter().map(|item| {
        let subtotal = if order.discount_type.is_normal() {
            item.line_total()
        } else {
            item.line_total() * multiplier
        };

        format!(
            "{},{},{},{},{},{}",
            item.product.id,
            escape_name(&item.product.name),
            item.quantity,
            format_money(item.product.price),
            format_money(subtotal),
            order.discount_type,
        )
    }));

    rows.push("Precio Total".to_string());
    rows.push(format_money(total));
    rows.push("Colecciones".to_string());
    rows.push(format_money(total * collection_rate()));
    rows.push("Proxima Coleccion".to_string());
    rows.push(format_money(next_collection()));
    rows.push("Sobrante".to_string());
    rows.push(format_money(total));

    let rows: Vec<String> = rows.into_iter().map(|row| format!("{LEAD}{row}")).collect();

    let filename = format!("Pedido de {} del {}.csv", order.user_id, order.display_date);

    debug!(order_id = %order.id, lines = order.cart.len(), %filename, "rendered order summary export");

    ExportedFile::from_rows(filename, &rows)
}
