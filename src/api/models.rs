//! API request and response models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::validation::{DecimalInput, PrimaryKeyInput, TextInput};
use crate::catalog::model::{CategoryId, ProductId};

/// Category as accepted on create and update.
///
/// `id` is assigned by the store; if a client sends one it is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CategoryWrite {
    #[serde(default)]
    pub name: Option<TextInput>,
}

/// Category as rendered in responses
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryRead {
    pub id: CategoryId,
    pub name: String,
}

/// Product as accepted on create and update
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProductWrite {
    #[serde(default)]
    pub name: Option<TextInput>,

    #[serde(default)]
    pub description: Option<TextInput>,

    /// Number or numeric string
    #[serde(default)]
    pub price: Option<DecimalInput>,

    /// Write-only reference to the owning category
    #[serde(default)]
    pub category_id: Option<PrimaryKeyInput>,
}

/// Product as rendered in responses
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProductRead {
    pub id: ProductId,
    pub name: String,
    pub description: String,

    /// Rendered as a string with two fractional digits
    pub price: Decimal,

    /// Display name of the category, not its id
    pub category: String,
}

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub categories: usize,
    pub products: usize,
}
