//! In-process catalog store

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::catalog::model::{
    Category, CategoryId, NewCategory, NewProduct, Product, ProductId, ProductWithCategory,
};
use crate::catalog::store::{CatalogStore, StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Product>,
    last_category_id: i64,
    last_product_id: i64,
}

impl Tables {
    fn check_category(&self, id: CategoryId) -> StoreResult<Category> {
        self.categories
            .get(&id)
            .cloned()
            .ok_or(StoreError::ForeignKeyViolation {
                field: "category_id",
                id,
            })
    }

    fn join(&self, product: &Product) -> Option<ProductWithCategory> {
        let category = self.categories.get(&product.category_id)?;
        Some(ProductWithCategory {
            product: product.clone(),
            category: category.clone(),
        })
    }
}

/// Store keeping both tables behind one lock.
///
/// Ids are handed out from per-table sequences and never reused, so ordering
/// the maps by id yields insertion order.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn list_categories(&self) -> Vec<Category> {
        self.tables.read().categories.values().cloned().collect()
    }

    async fn get_category(&self, id: CategoryId) -> Option<Category> {
        self.tables.read().categories.get(&id).cloned()
    }

    async fn insert_category(&self, category: NewCategory) -> Category {
        let mut tables = self.tables.write();
        tables.last_category_id += 1;
        let created = Category {
            id: CategoryId(tables.last_category_id),
            name: category.name,
        };
        tables.categories.insert(created.id, created.clone());
        info!(id = %created.id, "Category inserted");
        created
    }

    async fn update_category(&self, id: CategoryId, category: NewCategory) -> StoreResult<Category> {
        let mut tables = self.tables.write();
        let stored = tables.categories.get_mut(&id).ok_or(StoreError::NotFound {
            entity: "category",
            id: id.0,
        })?;
        stored.name = category.name;
        info!(id = %id, "Category updated");
        Ok(stored.clone())
    }

    async fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let category = tables.categories.get(&id).ok_or(StoreError::NotFound {
            entity: "category",
            id: id.0,
        })?;

        let referenced_by = tables
            .products
            .values()
            .filter(|p| p.category_id == id)
            .count();
        if referenced_by > 0 {
            warn!(id = %id, referenced_by, "Refusing to delete referenced category");
            return Err(StoreError::Protected {
                entity: "category",
                name: category.name.clone(),
                referenced_by,
            });
        }

        tables.categories.remove(&id);
        info!(id = %id, "Category deleted");
        Ok(())
    }

    async fn list_products(&self) -> Vec<Product> {
        self.tables.read().products.values().cloned().collect()
    }

    async fn get_product(&self, id: ProductId) -> Option<Product> {
        self.tables.read().products.get(&id).cloned()
    }

    async fn list_products_with_category(&self) -> Vec<ProductWithCategory> {
        let tables = self.tables.read();
        tables
            .products
            .values()
            .filter_map(|product| tables.join(product))
            .collect()
    }

    async fn get_product_with_category(&self, id: ProductId) -> Option<ProductWithCategory> {
        let tables = self.tables.read();
        tables.products.get(&id).and_then(|product| tables.join(product))
    }

    async fn insert_product(&self, product: NewProduct) -> StoreResult<ProductWithCategory> {
        let mut tables = self.tables.write();
        let category = tables.check_category(product.category_id)?;

        tables.last_product_id += 1;
        let created = Product {
            id: ProductId(tables.last_product_id),
            price: product.stored_price(),
            name: product.name,
            description: product.description,
            category_id: product.category_id,
        };
        tables.products.insert(created.id, created.clone());
        info!(id = %created.id, category_id = %created.category_id, "Product inserted");
        Ok(ProductWithCategory {
            product: created,
            category,
        })
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: NewProduct,
    ) -> StoreResult<ProductWithCategory> {
        let mut tables = self.tables.write();
        if !tables.products.contains_key(&id) {
            return Err(StoreError::NotFound {
                entity: "product",
                id: id.0,
            });
        }
        let category = tables.check_category(product.category_id)?;

        let updated = Product {
            id,
            price: product.stored_price(),
            name: product.name,
            description: product.description,
            category_id: product.category_id,
        };
        tables.products.insert(id, updated.clone());
        info!(id = %id, category_id = %updated.category_id, "Product updated");
        Ok(ProductWithCategory {
            product: updated,
            category,
        })
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if tables.products.remove(&id).is_none() {
            return Err(StoreError::NotFound {
                entity: "product",
                id: id.0,
            });
        }
        info!(id = %id, "Product deleted");
        Ok(())
    }

    async fn counts(&self) -> (usize, usize) {
        let tables = self.tables.read();
        debug!(
            categories = tables.categories.len(),
            products = tables.products.len(),
            "Counted catalog records"
        );
        (tables.categories.len(), tables.products.len())
    }
}
