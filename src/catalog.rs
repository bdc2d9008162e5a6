//! Catalog
//!
//! The fixed product list, its categories and the user directory, loaded from
//! a YAML document:
//!
//! ```yaml
//! categories: [Cabello, Cuerpo]
//! products:
//!   - { id: SH-01, name: Shampoo Herbal, category: Cabello, price: 85.5, unit: 1L, imageType: shampoo }
//! users:
//!   - { id: CL-001, name: Ana López, role: Cliente, avatarInitials: AL, email: ana@example.com }
//! ```

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{products::Product, users::User};

/// Category label that selects every product.
pub const ALL_CATEGORIES: &str = "Todos";

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Two users share an id
    #[error("Duplicate user id: {0}")]
    DuplicateUser(String),

    /// A product has a negative price
    #[error("Negative price for product: {0}")]
    NegativePrice(String),
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    categories: Vec<String>,

    #[serde(default)]
    products: Vec<Product>,

    #[serde(default)]
    users: Vec<User>,
}

/// Products, categories and users available to the representative.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<String>,
    users: Vec<User>,

    product_keys: FxHashMap<String, usize>,
    user_keys: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from its parts.
    ///
    /// When `categories` is empty they are taken from the products, in order
    /// of first appearance.
    ///
    /// # Errors
    ///
    /// Returns an error if product or user ids repeat, or a price is negative.
    pub fn new(
        products: Vec<Product>,
        categories: Vec<String>,
        users: Vec<User>,
    ) -> Result<Self, CatalogError> {
        let mut product_keys = FxHashMap::default();

        for (idx, product) in products.iter().enumerate() {
            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }

            if product_keys.insert(product.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        let mut user_keys = FxHashMap::default();

        for (idx, user) in users.iter().enumerate() {
            if user_keys.insert(user.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateUser(user.id.clone()));
            }
        }

        let categories = if categories.is_empty() {
            let mut derived: Vec<String> = Vec::new();

            for product in &products {
                if !derived.contains(&product.category) {
                    derived.push(product.category.clone());
                }
            }

            derived
        } else {
            categories
        };

        Ok(Self {
            products,
            categories,
            users,
            product_keys,
            user_keys,
        })
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or the catalog is inconsistent.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_norway::from_str(contents)?;

        Self::new(document.products, document.categories, document.users)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or is inconsistent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let catalog = Self::from_yaml(&fs::read_to_string(path)?)?;

        debug!(
            path = %path.display(),
            products = catalog.products.len(),
            users = catalog.users.len(),
            "catalog loaded"
        );

        Ok(catalog)
    }

    /// Look up a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.product_keys
            .get(id)
            .and_then(|idx| self.products.get(*idx))
    }

    /// Look up a user by id.
    pub fn user(&self, id: &str) -> Option<&User> {
        self.user_keys.get(id).and_then(|idx| self.users.get(*idx))
    }

    /// Every product, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Every category, in catalog order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Every user, in directory order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Products in `category` whose name or id contains `term`.
    ///
    /// `None` or [`ALL_CATEGORIES`] selects every category; an empty term
    /// matches everything.
    pub fn filter_products(&self, category: Option<&str>, term: &str) -> Vec<&Product> {
        let category = category.filter(|category| *category != ALL_CATEGORIES);

        self.products
            .iter()
            .filter(|product| category.is_none_or(|category| product.category == category))
            .filter(|product| product.matches(term))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const CATALOG: &str = r"
categories: [Cabello, Cuerpo]
products:
  - { id: SH-01, name: Shampoo Herbal, category: Cabello, price: 85.5, unit: 1L, imageType: shampoo }
  - { id: AC-01, name: Acondicionador, category: Cabello, price: 90, unit: 1L, imageType: conditioner }
  - { id: JB-01, name: Jabón de Avena, category: Cuerpo, price: 25, unit: pza, imageType: soap }
users:
  - { id: CL-001, name: Ana López, role: Cliente, avatarInitials: AL, email: ana@example.com }
";

    #[test]
    fn parses_products_and_users() -> TestResult {
        let catalog = Catalog::from_yaml(CATALOG)?;

        assert_eq!(catalog.products().len(), 3);
        assert_eq!(
            catalog.product("SH-01").map(|p| p.price),
            Some(Decimal::new(855, 1))
        );
        assert_eq!(
            catalog.user("CL-001").map(|u| u.name.as_str()),
            Some("Ana López")
        );
        assert!(catalog.product("nope").is_none());

        Ok(())
    }

    #[test]
    fn filter_by_category_and_term() -> TestResult {
        let catalog = Catalog::from_yaml(CATALOG)?;

        let ids = |products: Vec<&Product>| -> Vec<String> {
            products.into_iter().map(|p| p.id.clone()).collect()
        };

        assert_eq!(ids(catalog.filter_products(Some("Cabello"), "")), ["SH-01", "AC-01"]);
        assert_eq!(ids(catalog.filter_products(Some(ALL_CATEGORIES), "jb")), ["JB-01"]);
        assert_eq!(ids(catalog.filter_products(None, "HERBAL")), ["SH-01"]);
        assert!(catalog.filter_products(Some("Cuerpo"), "shampoo").is_empty());

        Ok(())
    }

    #[test]
    fn categories_derived_when_missing() -> TestResult {
        let catalog = Catalog::from_yaml(
            r"
products:
  - { id: A, name: A, category: Uno, price: 1 }
  - { id: B, name: B, category: Dos, price: 1 }
  - { id: C, name: C, category: Uno, price: 1 }
",
        )?;

        assert_eq!(catalog.categories(), ["Uno", "Dos"]);

        Ok(())
    }

    #[test]
    fn duplicate_product_ids_are_rejected() {
        let result = Catalog::from_yaml(
            r"
products:
  - { id: A, name: A, category: Uno, price: 1 }
  - { id: A, name: B, category: Uno, price: 2 }
",
        );

        assert!(matches!(result, Err(CatalogError::DuplicateProduct(id)) if id == "A"));
    }

    #[test]
    fn negative_prices_are_rejected() {
        let result = Catalog::from_yaml(
            r"
products:
  - { id: A, name: A, category: Uno, price: -1 }
",
        );

        assert!(matches!(result, Err(CatalogError::NegativePrice(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Catalog::load("/definitely/not/here.yml");

        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
