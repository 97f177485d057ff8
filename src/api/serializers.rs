//! Serializers mapping stored entities to and from their API representation.
//!
//! Each serializer implements [`Resource`], the contract the generic CRUD
//! handlers are written against. Write payloads are validated field by field
//! and all failures are reported together.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::api::models::{CategoryRead, CategoryWrite, ProductRead, ProductWrite};
use crate::api::validation::{
    validate_pk, validate_price, validate_text, ValidationErrors, REQUIRED,
};
use crate::catalog::model::{
    Category, CategoryId, NewCategory, NewProduct, Product, ProductId, ProductWithCategory,
    DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH,
};
use crate::catalog::store::CatalogStore;
use crate::error::{invalid_pk_message, AppError, Result};

/// A CRUD resource exposed through the router
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    /// Singular entity name used in logs and errors
    const ENTITY: &'static str;

    /// Incoming payload shape
    type Write: DeserializeOwned + Send + 'static;

    /// Outgoing representation
    type Read: Serialize + Send + 'static;

    async fn list(store: &dyn CatalogStore) -> Result<Vec<Self::Read>>;

    async fn retrieve(store: &dyn CatalogStore, id: i64) -> Result<Self::Read>;

    async fn create(store: &dyn CatalogStore, payload: Self::Write) -> Result<Self::Read>;

    /// Replace (`partial == false`) or patch (`partial == true`) a record
    async fn update(
        store: &dyn CatalogStore,
        id: i64,
        payload: Self::Write,
        partial: bool,
    ) -> Result<Self::Read>;

    async fn destroy(store: &dyn CatalogStore, id: i64) -> Result<()>;
}

fn not_found(entity: &'static str, id: i64) -> AppError {
    AppError::NotFound {
        entity,
        id: id.to_string(),
    }
}

/// Resolve a field that may be absent: required on full writes, kept from
/// `current` on partial ones.
fn merge_field<T, F>(
    errors: &mut ValidationErrors,
    field: &str,
    input: Option<T>,
    current: Option<String>,
    validate: F,
) -> Option<String>
where
    F: FnOnce(T) -> std::result::Result<String, Vec<String>>,
{
    match (input, current) {
        (Some(value), _) => errors.check(field, validate(value)),
        (None, Some(current)) => Some(current),
        (None, None) => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

pub struct CategorySerializer;

impl CategorySerializer {
    pub fn to_representation(category: Category) -> CategoryRead {
        CategoryRead {
            id: category.id,
            name: category.name,
        }
    }

    /// Validate a write payload, merging over `current` for partial updates
    pub fn validate(
        payload: CategoryWrite,
        current: Option<&Category>,
    ) -> std::result::Result<NewCategory, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = merge_field(
            &mut errors,
            "name",
            payload.name,
            current.map(|c| c.name.clone()),
            |name| validate_text(&name, NAME_MAX_LENGTH),
        );

        match name {
            Some(name) if errors.is_empty() => Ok(NewCategory { name }),
            _ => Err(errors),
        }
    }
}

#[async_trait]
impl Resource for CategorySerializer {
    const ENTITY: &'static str = "category";
    type Write = CategoryWrite;
    type Read = CategoryRead;

    async fn list(store: &dyn CatalogStore) -> Result<Vec<CategoryRead>> {
        let categories = store.list_categories().await;
        debug!(count = categories.len(), "Listing categories");
        Ok(categories.into_iter().map(Self::to_representation).collect())
    }

    async fn retrieve(store: &dyn CatalogStore, id: i64) -> Result<CategoryRead> {
        store
            .get_category(CategoryId(id))
            .await
            .map(Self::to_representation)
            .ok_or_else(|| not_found(Self::ENTITY, id))
    }

    async fn create(store: &dyn CatalogStore, payload: CategoryWrite) -> Result<CategoryRead> {
        let category = Self::validate(payload, None)?;
        let created = store.insert_category(category).await;
        Ok(Self::to_representation(created))
    }

    async fn update(
        store: &dyn CatalogStore,
        id: i64,
        payload: CategoryWrite,
        partial: bool,
    ) -> Result<CategoryRead> {
        let id = CategoryId(id);
        let current = store
            .get_category(id)
            .await
            .ok_or_else(|| not_found(Self::ENTITY, id.0))?;

        let category = Self::validate(payload, partial.then_some(&current))?;
        let updated = store.update_category(id, category).await?;
        Ok(Self::to_representation(updated))
    }

    async fn destroy(store: &dyn CatalogStore, id: i64) -> Result<()> {
        store.delete_category(CategoryId(id)).await?;
        Ok(())
    }
}

pub struct ProductSerializer;

impl ProductSerializer {
    /// Render a product with its category's display name
    pub fn to_representation(joined: ProductWithCategory) -> ProductRead {
        let ProductWithCategory { product, category } = joined;
        ProductRead {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: category.to_string(),
        }
    }

    /// Validate a write payload against the store, merging over `current`
    /// for partial updates
    pub async fn validate(
        store: &dyn CatalogStore,
        payload: ProductWrite,
        current: Option<&Product>,
    ) -> Result<NewProduct> {
        let mut errors = ValidationErrors::new();

        let name = merge_field(
            &mut errors,
            "name",
            payload.name,
            current.map(|p| p.name.clone()),
            |name| validate_text(&name, NAME_MAX_LENGTH),
        );
        let description = merge_field(
            &mut errors,
            "description",
            payload.description,
            current.map(|p| p.description.clone()),
            |description| validate_text(&description, DESCRIPTION_MAX_LENGTH),
        );

        let price = match (payload.price, current) {
            (Some(input), _) => errors.check("price", validate_price(&input)),
            (None, Some(current)) => Some(current.price),
            (None, None) => {
                errors.add("price", REQUIRED);
                None
            }
        };

        let category_id = match (payload.category_id, current) {
            (Some(input), _) => match errors.check("category_id", validate_pk(&input)) {
                Some(raw) => {
                    let id = CategoryId(raw);
                    if store.get_category(id).await.is_some() {
                        Some(id)
                    } else {
                        errors.add("category_id", invalid_pk_message(id));
                        None
                    }
                }
                None => None,
            },
            (None, Some(current)) => Some(current.category_id),
            (None, None) => {
                errors.add("category_id", REQUIRED);
                None
            }
        };

        match (name, description, price, category_id) {
            (Some(name), Some(description), Some(price), Some(category_id))
                if errors.is_empty() =>
            {
                Ok(NewProduct {
                    name,
                    description,
                    price,
                    category_id,
                })
            }
            _ => Err(errors.into()),
        }
    }
}

#[async_trait]
impl Resource for ProductSerializer {
    const ENTITY: &'static str = "product";
    type Write = ProductWrite;
    type Read = ProductRead;

    async fn list(store: &dyn CatalogStore) -> Result<Vec<ProductRead>> {
        let products = store.list_products_with_category().await;
        debug!(count = products.len(), "Listing products");
        Ok(products.into_iter().map(Self::to_representation).collect())
    }

    async fn retrieve(store: &dyn CatalogStore, id: i64) -> Result<ProductRead> {
        store
            .get_product_with_category(ProductId(id))
            .await
            .map(Self::to_representation)
            .ok_or_else(|| not_found(Self::ENTITY, id))
    }

    async fn create(store: &dyn CatalogStore, payload: ProductWrite) -> Result<ProductRead> {
        let product = Self::validate(store, payload, None).await?;
        let created = store.insert_product(product).await?;
        Ok(Self::to_representation(created))
    }

    async fn update(
        store: &dyn CatalogStore,
        id: i64,
        payload: ProductWrite,
        partial: bool,
    ) -> Result<ProductRead> {
        let id = ProductId(id);
        let current = store
            .get_product(id)
            .await
            .ok_or_else(|| not_found(Self::ENTITY, id.0))?;

        let product = Self::validate(store, payload, partial.then_some(&current)).await?;
        let updated = store.update_product(id, product).await?;
        Ok(Self::to_representation(updated))
    }

    async fn destroy(store: &dyn CatalogStore, id: i64) -> Result<()> {
        store.delete_product(ProductId(id)).await?;
        Ok(())
    }
}
