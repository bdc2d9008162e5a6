//! Cart
//!
//! The in-progress order. Items keep the position they were first added at;
//! changing a quantity never moves an item, and a quantity of zero removes it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    pricing::{line_total, total_price},
    products::Product,
};

/// A product with the quantity ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product as it was when added.
    #[serde(flatten)]
    pub product: Product,

    /// Units ordered, always positive inside a cart.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item.
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Catalog id of the product.
    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// Undiscounted price for this line.
    pub fn line_total(&self) -> Decimal {
        line_total(self.product.price, self.quantity)
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity ordered for `product`.
    ///
    /// A quantity of zero removes the product. An existing line keeps its
    /// position; a new one goes to the end.
    pub fn upsert(&mut self, product: &Product, quantity: u32) -> &Self {
        let existing = self.items.iter().position(|item| item.id() == product.id);

        match (existing, quantity) {
            (Some(idx), 0) => {
                self.items.remove(idx);
            }
            (None, 0) => {}
            (Some(idx), quantity) => {
                if let Some(item) = self.items.get_mut(idx) {
                    item.quantity = quantity;
                }
            }
            (None, quantity) => self.items.push(LineItem::new(product.clone(), quantity)),
        }

        self
    }

    /// Add one unit of `product`.
    pub fn increment(&mut self, product: &Product) -> &Self {
        let quantity = self.quantity_of(&product.id).saturating_add(1);

        self.upsert(product, quantity)
    }

    /// Take one unit of `product` away, removing it when none are left.
    pub fn decrement(&mut self, product: &Product) -> &Self {
        let quantity = self.quantity_of(&product.id).saturating_sub(1);

        self.upsert(product, quantity)
    }

    /// Quantity ordered for a product id, zero when absent.
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.get(product_id).map_or(0, |item| item.quantity)
    }

    /// Get the line for a product id.
    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Undiscounted sum of price × quantity.
    pub fn subtotal(&self) -> Decimal {
        total_price(
            self.items
                .iter()
                .map(|item| (item.product.price, item.quantity)),
        )
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// The lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get the number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
