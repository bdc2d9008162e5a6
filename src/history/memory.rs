//! In-memory order history

use tracing::debug;

use super::{FinalizedOrder, NewOrder, OrderHistoryStore, orders_for_user};

/// History held in memory for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    orders: Vec<FinalizedOrder>,
}

impl InMemoryHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored order, most recently appended first.
    pub fn orders(&self) -> &[FinalizedOrder] {
        &self.orders
    }
}

impl OrderHistoryStore for InMemoryHistory {
    fn append(&mut self, order: NewOrder) -> FinalizedOrder {
        let order = FinalizedOrder::from_new(order);

        debug!(order_id = %order.id, user_id = %order.user_id, "order appended to memory history");

        self.orders.insert(0, order.clone());

        order
    }

    fn list_for_user(&self, user_id: &str) -> Vec<FinalizedOrder> {
        orders_for_user(self.orders.clone(), user_id)
    }
}
