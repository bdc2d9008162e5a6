//! Pedidos prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, LineItem},
    catalog::{ALL_CATEGORIES, Catalog, CatalogError},
    clock::{Clock, FixedClock, SystemClock},
    discounts::{DiscountTier, apply_discount, multiplier_for},
    export::{
        DirectorySink, ExportSink, ExportedFile, MemorySink, SinkError, current_order,
        deliver_or_log, order_summary,
    },
    history::{
        FinalizedOrder, HistoryError, InMemoryHistory, JsonFileHistory, NewOrder,
        OrderHistoryStore, OrderId,
    },
    products::Product,
    session::{FinalizeError, Finalized, OrderSession},
    users::User,
};
