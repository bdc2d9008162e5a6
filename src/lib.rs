//! Pedidos
//!
//! Order composition and export for field sales representatives: a cart built
//! from a fixed catalog, fixed discount tiers, spreadsheet-ready CSV exports
//! and a per-user history of finalized orders.

pub mod cart;
pub mod catalog;
pub mod clock;
pub mod discounts;
pub mod export;
pub mod history;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod session;
pub mod users;
