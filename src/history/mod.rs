//! Order history
//!
//! Finalized orders are kept most-recent-first and never modified once
//! stored. Stores never fail their callers: unreadable history reads as empty
//! and write failures are logged.

use std::fmt;

use jiff::{Timestamp, Zoned};
use mockall::automock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, LineItem},
    clock::display_date,
    discounts::{DiscountTier, apply_discount},
};

pub mod file;
pub mod memory;

pub use file::JsonFileHistory;
pub use memory::InMemoryHistory;

/// Number of timestamp digits kept in an order id.
const ORDER_ID_DIGITS: u32 = 6;

/// Errors reading or writing persisted history.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The history file could not be read or written.
    #[error("history I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The history document is not a valid order collection.
    #[error("history is malformed: {0}")]
    Json(#[from] serde_json::Error),

    /// The rewritten history could not replace the previous file.
    #[error("failed to replace history file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Identifier of a finalized order, e.g. `ORD-482913`.
///
/// Derived from the finalize timestamp, so two orders finalized in the same
/// truncation window share an id. Stores accept duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Id for an order finalized at `timestamp`: `ORD-` and the low six
    /// digits of its millisecond count.
    pub fn for_timestamp(timestamp: Timestamp) -> Self {
        let window = 10_i64.pow(ORDER_ID_DIGITS);
        let digits = timestamp.as_millisecond().rem_euclid(window);

        OrderId(format!("ORD-{digits:06}"))
    }

    /// The id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        OrderId(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        OrderId(id)
    }
}

/// An order ready to be stored; the store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// When the order was finalized, in the display time zone.
    pub placed_at: Zoned,

    /// Snapshot of the cart lines.
    pub cart: Vec<LineItem>,

    /// Discounted total, unrounded.
    pub total: Decimal,

    /// Tier applied to the total.
    pub discount_type: DiscountTier,

    /// Owning user.
    pub user_id: String,
}

impl NewOrder {
    /// Snapshot `cart` and discount its subtotal by `tier`.
    pub fn from_cart(
        cart: &Cart,
        tier: DiscountTier,
        user_id: impl Into<String>,
        placed_at: Zoned,
    ) -> Self {
        Self {
            placed_at,
            cart: cart.items().to_vec(),
            total: apply_discount(cart.subtotal(), &tier),
            discount_type: tier,
            user_id: user_id.into(),
        }
    }
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedOrder {
    /// Generated id, not guaranteed unique.
    pub id: OrderId,

    /// Finalize instant.
    pub date: Timestamp,

    /// `D-M-YYYY` rendering of `date` in the zone it was finalized in.
    pub display_date: String,

    /// Cart lines at finalize time.
    pub cart: Vec<LineItem>,

    /// Discounted total, unrounded.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,

    /// Tier applied to the total.
    #[serde(default)]
    pub discount_type: DiscountTier,

    /// Owning user.
    pub user_id: String,
}

impl FinalizedOrder {
    /// Stamp a new order with its generated id.
    pub fn from_new(order: NewOrder) -> Self {
        let date = order.placed_at.timestamp();

        Self {
            id: OrderId::for_timestamp(date),
            date,
            display_date: display_date(&order.placed_at),
            cart: order.cart,
            total: order.total,
            discount_type: order.discount_type,
            user_id: order.user_id,
        }
    }

    /// Undiscounted sum of the stored lines.
    pub fn subtotal(&self) -> Decimal {
        self.cart.iter().map(LineItem::line_total).sum()
    }

    /// Sum of the stored quantities.
    pub fn total_items(&self) -> u64 {
        self.cart.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Durable, append-only order history.
#[automock]
pub trait OrderHistoryStore {
    /// Store `order` ahead of every earlier order and return it with its id.
    fn append(&mut self, order: NewOrder) -> FinalizedOrder;

    /// All orders owned by `user_id`, most recent first.
    fn list_for_user(&self, user_id: &str) -> Vec<FinalizedOrder>;

    /// The first stored order with `order_id` owned by `user_id`.
    fn find_for_user(&self, user_id: &str, order_id: &OrderId) -> Option<FinalizedOrder> {
        self.list_for_user(user_id)
            .into_iter()
            .find(|order| &order.id == order_id)
    }
}

impl<S: OrderHistoryStore + ?Sized> OrderHistoryStore for &mut S {
    fn append(&mut self, order: NewOrder) -> FinalizedOrder {
        (**self).append(order)
    }

    fn list_for_user(&self, user_id: &str) -> Vec<FinalizedOrder> {
        (**self).list_for_user(user_id)
    }

    fn find_for_user(&self, user_id: &str, order_id: &OrderId) -> Option<FinalizedOrder> {
        (**self).find_for_user(user_id, order_id)
    }
}

/// Keep `user_id`'s orders, most recent first. Equal dates keep stored order.
pub(crate) fn orders_for_user(orders: Vec<FinalizedOrder>, user_id: &str) -> Vec<FinalizedOrder> {
    let mut owned: Vec<FinalizedOrder> = orders
        .into_iter()
        .filter(|order| order.user_id == user_id)
        .collect();

    owned.sort_by(|a, b| b.date.cmp(&a.date));

    owned
}

#[cfg(test)]
mod tests {
    use jiff::tz::TimeZone;
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn zoned(s: &str) -> Result<Zoned, jiff::Error> {
        Ok(s.parse::<Timestamp>()?.to_zoned(TimeZone::UTC))
    }

    #[test]
    fn order_id_keeps_low_six_digits() -> TestResult {
        let ts = Timestamp::from_millisecond(1_767_225_600_123)?;

        assert_eq!(OrderId::for_timestamp(ts).as_str(), "ORD-600123");

        Ok(())
    }

    #[test]
    fn order_id_is_zero_padded() -> TestResult {
        let ts = Timestamp::from_millisecond(42_000_042)?;

        assert_eq!(OrderId::for_timestamp(ts).to_string(), "ORD-000042");

        Ok(())
    }

    #[test]
    fn new_order_snapshots_cart_and_discounts_total() -> TestResult {
        let mut cart = Cart::new();
        let product = Product::new("A1", "Shampoo, 1L", "Cabello", Decimal::from(10));
        cart.upsert(&product, 2);

        let order = NewOrder::from_cart(
            &cart,
            DiscountTier::TwentyPercent,
            "U1",
            zoned("2026-01-02T10:00:00Z")?,
        );

        cart.upsert(&product, 9);

        assert_eq!(order.total, Decimal::from(16));
        assert_eq!(order.cart.first().map(|item| item.quantity), Some(2));

        Ok(())
    }

    #[test]
    fn finalized_order_round_trips_camel_case() -> TestResult {
        let order = FinalizedOrder::from_new(NewOrder {
            placed_at: zoned("2026-01-02T10:00:00Z")?,
            cart: vec![],
            total: Decimal::new(1650, 2),
            discount_type: DiscountTier::ThirtyPercent,
            user_id: "U1".to_string(),
        });

        let json = serde_json::to_value(&order)?;

        assert_eq!(json["displayDate"], "2-1-2026");
        assert_eq!(json["discountType"], "30%");
        assert_eq!(json["userId"], "U1");
        assert_eq!(json["total"], 16.5);

        let back: FinalizedOrder = serde_json::from_value(json)?;
        assert_eq!(back, order);

        Ok(())
    }

    #[test]
    fn reads_records_written_with_millisecond_dates() -> TestResult {
        let order: FinalizedOrder = serde_json::from_str(
            r#"{
                "id": "ORD-123456",
                "date": "2026-01-02T10:00:00.000Z",
                "displayDate": "2-1-2026",
                "cart": [{"id":"A1","name":"Gel","category":"Cabello","price":10,"unit":"pza","imageType":"gel","quantity":1}],
                "total": 10,
                "discountType": "normal",
                "userId": "U1"
            }"#,
        )?;

        assert_eq!(order.subtotal(), Decimal::from(10));
        assert_eq!(order.total_items(), 1);
        assert!(order.discount_type.is_normal());

        Ok(())
    }

    #[test]
    fn orders_for_user_filters_and_sorts_descending() -> TestResult {
        let make = |user: &str, at: &str| -> Result<FinalizedOrder, jiff::Error> {
            Ok(FinalizedOrder::from_new(NewOrder {
                placed_at: zoned(at)?,
                cart: vec![],
                total: Decimal::ZERO,
                discount_type: DiscountTier::Normal,
                user_id: user.to_string(),
            }))
        };

        let orders = vec![
            make("U1", "2026-01-01T00:00:00Z")?,
            make("U2", "2026-01-05T00:00:00Z")?,
            make("U1", "2026-01-03T00:00:00Z")?,
        ];

        let listed = orders_for_user(orders, "U1");
        let dates: Vec<String> = listed.iter().map(|o| o.display_date.clone()).collect();

        assert_eq!(dates, ["3-1-2026", "1-1-2026"]);

        Ok(())
    }
}
