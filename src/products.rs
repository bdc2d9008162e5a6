//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product.
///
/// Products are owned by the catalog and never mutated by an order; carts and
/// stored orders hold their own copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier, unique within the catalog.
    pub id: String,

    /// Display name, printed in exports.
    pub name: String,

    /// Category label.
    pub category: String,

    /// Unit price in currency units.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Display unit (e.g. `"1L"`, `"pza"`).
    #[serde(default)]
    pub unit: String,

    /// Presentation hint used to pick an icon.
    #[serde(default)]
    pub image_type: String,
}

impl Product {
    /// Create a product with an empty unit and image hint.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            unit: String::new(),
            image_type: String::new(),
        }
    }

    /// Set the display unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the presentation hint.
    #[must_use]
    pub fn with_image_type(mut self, image_type: impl Into<String>) -> Self {
        self.image_type = image_type.into();
        self
    }

    /// Whether the product name or id contains `term`, ignoring case.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();

        self.name.to_lowercase().contains(&term) || self.id.to_lowercase().contains(&term)
    }
}
