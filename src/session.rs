//! Order session
//!
//! One representative's order-composition flow: the cart being built, the
//! selected discount tier, and the history the finished orders go to.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::Cart,
    clock::Clock,
    discounts::{DiscountTier, apply_discount},
    export::{ExportedFile, current_order, order_summary},
    history::{FinalizedOrder, NewOrder, OrderHistoryStore, OrderId},
    products::Product,
    users::User,
};

/// Errors finalizing an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FinalizeError {
    /// There is nothing in the cart to finalize.
    #[error("cannot finalize an empty cart")]
    EmptyCart,
}

/// A finalized order and its summary export.
#[derive(Debug, Clone, PartialEq)]
pub struct Finalized {
    /// The order as stored.
    pub order: FinalizedOrder,

    /// Summary export of the stored order.
    pub export: ExportedFile,
}

/// Order composition for a logged-in user.
#[derive(Debug)]
pub struct OrderSession<S, C> {
    user: User,
    cart: Cart,
    discount: DiscountTier,
    history: S,
    clock: C,
}

impl<S: OrderHistoryStore, C: Clock> OrderSession<S, C> {
    /// Start a session for `user` with an empty cart.
    pub fn new(user: User, history: S, clock: C) -> Self {
        Self {
            user,
            cart: Cart::new(),
            discount: DiscountTier::Normal,
            history,
            clock,
        }
    }

    /// The logged-in user.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The cart being composed.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Set the quantity ordered for `product`; zero removes it.
    pub fn upsert(&mut self, product: &Product, quantity: u32) -> &Cart {
        self.cart.upsert(product, quantity)
    }

    /// Add one unit of `product`.
    pub fn increment(&mut self, product: &Product) -> &Cart {
        self.cart.increment(product)
    }

    /// Remove one unit of `product`.
    pub fn decrement(&mut self, product: &Product) -> &Cart {
        self.cart.decrement(product)
    }

    /// The selected discount tier.
    pub fn discount(&self) -> &DiscountTier {
        &self.discount
    }

    /// Select a discount tier.
    pub fn set_discount(&mut self, tier: DiscountTier) {
        self.discount = tier;
    }

    /// Undiscounted cart subtotal.
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    /// Sum of quantities in the cart.
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Cart subtotal with the selected tier applied, unrounded.
    pub fn discounted_total(&self) -> Decimal {
        apply_discount(self.cart.subtotal(), &self.discount)
    }

    /// Undiscounted export of the cart as it stands.
    pub fn export_current(&self) -> ExportedFile {
        current_order(&self.cart, &self.user, &self.clock.now())
    }

    /// Store the cart as a finalized order, render its summary and start a
    /// fresh cart.
    ///
    /// The order is kept even if the store fails to persist it.
    ///
    /// # Errors
    ///
    /// Returns [`FinalizeError::EmptyCart`] if the cart is empty; nothing is
    /// stored.
    pub fn finalize(&mut self) -> Result<Finalized, FinalizeError> {
        if self.cart.is_empty() {
            warn!(user_id = %self.user.id, "refusing to finalize empty cart");
            return Err(FinalizeError::EmptyCart);
        }

        let new_order = NewOrder::from_cart(
            &self.cart,
            self.discount.clone(),
            self.user.id.clone(),
            self.clock.now(),
        );

        let order = self.history.append(new_order);
        let export = order_summary(&order, &self.user);

        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            items = order.total_items(),
            discount = %order.discount_type,
            "order finalized"
        );

        self.cart.clear();
        self.discount = DiscountTier::Normal;

        Ok(Finalized { order, export })
    }

    /// The user's stored orders, most recent first.
    pub fn history(&self) -> Vec<FinalizedOrder> {
        self.history.list_for_user(&self.user.id)
    }

    /// Summary export of one of the user's stored orders.
    pub fn reexport(&self, order_id: &OrderId) -> Option<ExportedFile> {
        self.history
            .find_for_user(&self.user.id, order_id)
            .map(|order| order_summary(&order, &self.user))
    }

    /// The history store.
    pub fn history_store(&self) -> &S {
        &self.history
    }

    /// End the session, discarding the cart, and hand back the store.
    pub fn logout(self) -> S {
        info!(user_id = %self.user.id, discarded_items = self.cart.len(), "session ended");

        self.history
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, tz::TimeZone};
    use testresult::TestResult;

    use crate::{
        clock::FixedClock,
        history::{InMemoryHistory, MockOrderHistoryStore},
    };

    use super::*;

    fn clock() -> Result<FixedClock, jiff::Error> {
        Ok(FixedClock::new(
            "2026-03-05T15:00:00.123Z"
                .parse::<Timestamp>()?
                .to_zoned(TimeZone::UTC),
        ))
    }

    fn shampoo() -> Product {
        Product::new("A1", "Shampoo, 1L", "Cabello", Decimal::from(10))
    }

    #[test]
    fn finalize_stores_discounted_order_and_clears_cart() -> TestResult {
        let mut session = OrderSession::new(User::new("U1", "Ana"), InMemoryHistory::new(), clock()?);

        session.upsert(&shampoo(), 2);
        session.set_discount(DiscountTier::TwentyPercent);

        let finalized = session.finalize()?;

        assert_eq!(finalized.order.total, Decimal::from(16));
        assert_eq!(finalized.order.id.as_str(), "ORD-800123");
        assert_eq!(finalized.order.display_date, "5-3-2026");
        assert_eq!(finalized.export.filename, "Pedido de U1 del 5-3-2026.csv");
        assert!(session.cart().is_empty());
        assert!(session.discount().is_normal());
        assert_eq!(session.history(), vec![finalized.order]);

        Ok(())
    }

    #[test]
    fn finalize_empty_cart_stores_nothing() -> TestResult {
        let mut history = MockOrderHistoryStore::new();
        history.expect_append().never();

        let mut session = OrderSession::new(User::new("U1", "Ana"), history, clock()?);

        assert_eq!(session.finalize(), Err(FinalizeError::EmptyCart));

        Ok(())
    }

    #[test]
    fn finalize_appends_exactly_once_with_snapshot() -> TestResult {
        let mut history = MockOrderHistoryStore::new();
        history
            .expect_append()
            .times(1)
            .withf(|order: &NewOrder| {
                order.user_id == "U1"
                    && order.total == Decimal::from(14)
                    && order.discount_type == DiscountTier::ThirtyPercent
                    && order.cart.len() == 1
            })
            .returning(FinalizedOrder::from_new);

        let mut session = OrderSession::new(User::new("U1", "Ana"), history, clock()?);
        session.upsert(&shampoo(), 2);
        session.set_discount(DiscountTier::ThirtyPercent);

        let finalized = session.finalize()?;

        assert!(finalized.export.text().contains(",A1,\"Shampoo, 1L\",2,10.00,14.00,30%\n"));

        Ok(())
    }

    #[test]
    fn later_cart_changes_do_not_touch_stored_order() -> TestResult {
        let mut session = OrderSession::new(User::new("U1", "Ana"), InMemoryHistory::new(), clock()?);

        session.upsert(&shampoo(), 2);
        let finalized = session.finalize()?;

        session.upsert(&shampoo(), 7);

        let stored = session.history();
        assert_eq!(stored.first().map(|o| o.cart.clone()), Some(finalized.order.cart));
        assert_eq!(stored.first().and_then(|o| o.cart.first()).map(|i| i.quantity), Some(2));

        Ok(())
    }

    #[test]
    fn export_current_is_undiscounted() -> TestResult {
        let mut session = OrderSession::new(User::new("U1", "Ana"), InMemoryHistory::new(), clock()?);

        session.upsert(&shampoo(), 2);
        session.set_discount(DiscountTier::ThirtyPercent);

        let export = session.export_current();

        assert!(export.text().ends_with(",,,,,Subtotal,20.00"));
        assert_eq!(export.filename, "Pedido_U1_2026-03-05.csv");
        assert_eq!(session.discounted_total(), Decimal::from(14));

        Ok(())
    }

    #[test]
    fn reexport_reads_history_for_owner_only() -> TestResult {
        let mut history = InMemoryHistory::new();
        let mut other = OrderSession::new(User::new("U2", "Beto"), &mut history, clock()?);
        other.upsert(&shampoo(), 1);
        let theirs = other.finalize()?.order;
        drop(other);

        let session = OrderSession::new(User::new("U1", "Ana"), history, clock()?);

        assert!(session.reexport(&theirs.id).is_none());
        assert!(session.history().is_empty());

        Ok(())
    }

    #[test]
    fn reexport_matches_finalize_export() -> TestResult {
        let mut session = OrderSession::new(User::new("U1", "Ana"), InMemoryHistory::new(), clock()?);

        session.upsert(&shampoo(), 3);
        let finalized = session.finalize()?;

        assert_eq!(session.reexport(&finalized.order.id), Some(finalized.export));

        Ok(())
    }

    #[test]
    fn logout_discards_cart_and_keeps_history() -> TestResult {
        let mut session = OrderSession::new(User::new("U1", "Ana"), InMemoryHistory::new(), clock()?);

        session.upsert(&shampoo(), 1);
        session.finalize()?;
        session.upsert(&shampoo(), 4);

        let history = session.logout();

        assert_eq!(history.orders().len(), 1);

        Ok(())
    }
}
