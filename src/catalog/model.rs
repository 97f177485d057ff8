//! Catalog entities as they are persisted

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a category or product name
pub const NAME_MAX_LENGTH: usize = 200;

/// Maximum length of a product description
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;

/// Total digits a price may carry
pub const PRICE_MAX_DIGITS: u32 = 10;

/// Fractional digits a price is stored with
pub const PRICE_DECIMAL_PLACES: u32 = 2;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }
    };
}

entity_id!(
    /// Identifier of a stored category
    CategoryId
);

entity_id!(
    /// Identifier of a stored product
    ProductId
);

/// A product category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A product, referencing exactly one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: CategoryId,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A product read together with the category it references, so the pair
/// always comes from the same snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductWithCategory {
    pub product: Product,
    pub category: Category,
}

/// Validated field set for inserting or replacing a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

/// Validated field set for inserting or replacing a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: CategoryId,
}

impl NewProduct {
    /// Price as it is stored: exactly two fractional digits
    pub fn stored_price(&self) -> Decimal {
        let mut price = self.price;
        price.rescale(PRICE_DECIMAL_PLACES);
        price
    }
}
