//! Storage trait for catalog entities

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::model::{
    Category, CategoryId, NewCategory, NewProduct, Product, ProductId, ProductWithCategory,
};

/// Constraint violations raised by a store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{field} references missing category {id}")]
    ForeignKeyViolation { field: &'static str, id: CategoryId },

    #[error("{entity} '{name}' is referenced by {referenced_by} product(s)")]
    Protected {
        entity: &'static str,
        name: String,
        referenced_by: usize,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Transactional store holding categories and products.
///
/// Each call is atomic. Implementations must reject a product whose category
/// does not exist and must refuse to delete a category that is still
/// referenced. Listings are returned in insertion order.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_categories(&self) -> Vec<Category>;

    async fn get_category(&self, id: CategoryId) -> Option<Category>;

    async fn insert_category(&self, category: NewCategory) -> Category;

    async fn update_category(&self, id: CategoryId, category: NewCategory) -> StoreResult<Category>;

    async fn delete_category(&self, id: CategoryId) -> StoreResult<()>;

    async fn list_products(&self) -> Vec<Product>;

    async fn get_product(&self, id: ProductId) -> Option<Product>;

    /// Products joined with their categories, read under one snapshot
    async fn list_products_with_category(&self) -> Vec<ProductWithCategory>;

    async fn get_product_with_category(&self, id: ProductId) -> Option<ProductWithCategory>;

    async fn insert_product(&self, product: NewProduct) -> StoreResult<ProductWithCategory>;

    async fn update_product(
        &self,
        id: ProductId,
        product: NewProduct,
    ) -> StoreResult<ProductWithCategory>;

    async fn delete_product(&self, id: ProductId) -> StoreResult<()>;

    /// Number of stored categories and products
    async fn counts(&self) -> (usize, usize);
}
