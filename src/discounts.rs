//! Discounts
//!
//! Discount tiers are fixed business constants. A selector that doesn't name a
//! known tier is kept verbatim but discounts nothing.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A discount tier selected for an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiscountTier {
    /// No discount.
    #[default]
    Normal,

    /// 20% off.
    TwentyPercent,

    /// 30% off.
    ThirtyPercent,

    /// Any other selector, carried through unchanged.
    Unrecognised(String),
}

impl DiscountTier {
    /// The tiers offered to the representative, in menu order.
    pub const ALL: [DiscountTier; 3] = [
        DiscountTier::Normal,
        DiscountTier::TwentyPercent,
        DiscountTier::ThirtyPercent,
    ];

    /// Resolve a selector such as `"20%"`.
    pub fn parse(selector: &str) -> Self {
        match selector {
            "normal" => DiscountTier::Normal,
            "20%" => DiscountTier::TwentyPercent,
            "30%" => DiscountTier::ThirtyPercent,
            other => DiscountTier::Unrecognised(other.to_string()),
        }
    }

    /// The selector text, exactly as printed in exports.
    pub fn selector(&self) -> &str {
        match self {
            DiscountTier::Normal => "normal",
            DiscountTier::TwentyPercent => "20%",
            DiscountTier::ThirtyPercent => "30%",
            DiscountTier::Unrecognised(selector) => selector,
        }
    }

    /// Whether this is the `normal` tier.
    pub fn is_normal(&self) -> bool {
        matches!(self, DiscountTier::Normal)
    }

    /// Share of the price taken off.
    pub fn percentage_off(&self) -> Percentage {
        match self {
            DiscountTier::TwentyPercent => Percentage::from(Decimal::new(2, 1)),
            DiscountTier::ThirtyPercent => Percentage::from(Decimal::new(3, 1)),
            DiscountTier::Normal | DiscountTier::Unrecognised(_) => Percentage::from(Decimal::ZERO),
        }
    }

    /// Factor a price is multiplied by: `1.0`, `0.8` or `0.7`.
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE - self.percentage_off() * Decimal::ONE
    }
}

impl fmt::Display for DiscountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl From<&str> for DiscountTier {
    fn from(selector: &str) -> Self {
        DiscountTier::parse(selector)
    }
}

impl From<String> for DiscountTier {
    fn from(selector: String) -> Self {
        DiscountTier::parse(&selector)
    }
}

impl From<DiscountTier> for String {
    fn from(tier: DiscountTier) -> Self {
        match tier {
            DiscountTier::Unrecognised(selector) => selector,
            known => known.selector().to_string(),
        }
    }
}

/// Multiplier for a raw selector. Unknown selectors yield `1.0`.
pub fn multiplier_for(selector: &str) -> Decimal {
    DiscountTier::parse(selector).multiplier()
}

/// Apply a tier to a subtotal. The result is not rounded.
pub fn apply_discount(subtotal: Decimal, tier: &DiscountTier) -> Decimal {
    subtotal * tier.multiplier()
}
