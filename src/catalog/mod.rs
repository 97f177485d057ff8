//! Catalog module - entities, store, and fixture loading

pub mod fixtures;
pub mod memory;
pub mod model;
pub mod store;

pub use memory::InMemoryStore;
pub use model::{
    Category, CategoryId, NewCategory, NewProduct, Product, ProductId, ProductWithCategory,
};
pub use store::{CatalogStore, StoreError};
