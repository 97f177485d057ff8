//! YAML seed data for the catalog

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::api::models::{CategoryWrite, ProductWrite};
use crate::api::serializers::{CategorySerializer, ProductSerializer};
use crate::api::validation::{DecimalInput, PrimaryKeyInput};
use crate::catalog::model::CategoryId;
use crate::catalog::store::CatalogStore;
use crate::error::{AppError, Result};

/// Fixture file contents
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Fixtures {
    #[serde(default)]
    pub categories: Vec<CategoryFixture>,
    #[serde(default)]
    pub products: Vec<ProductFixture>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryFixture {
    pub name: String,
}

/// A product referencing its category by name
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductFixture {
    pub name: String,
    pub description: String,
    pub price: DecimalInput,
    pub category: String,
}

impl Fixtures {
    /// Read fixtures from a YAML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Fixture(format!("Failed to parse fixtures: {}", e)))
    }

    /// Insert every record, validating each with the API rules.
    ///
    /// Returns the number of categories and products inserted.
    pub async fn apply(self, store: &dyn CatalogStore) -> Result<(usize, usize)> {
        let mut category_ids: HashMap<String, CategoryId> = HashMap::new();

        for fixture in self.categories {
            let payload = CategoryWrite {
                name: Some(fixture.name.as_str().into()),
            };
            let category = CategorySerializer::validate(payload, None).map_err(|e| {
                AppError::Fixture(format!("Invalid category '{}': {}", fixture.name, e))
            })?;
            let created = store.insert_category(category).await;
            category_ids.insert(created.name.clone(), created.id);
        }

        let mut products = 0;
        for fixture in self.products {
            let category_id = category_ids.get(fixture.category.trim()).ok_or_else(|| {
                AppError::Fixture(format!(
                    "Product '{}' references unknown category '{}'",
                    fixture.name, fixture.category
                ))
            })?;

            let payload = ProductWrite {
                name: Some(fixture.name.as_str().into()),
                description: Some(fixture.description.into()),
                price: Some(fixture.price),
                category_id: Some(PrimaryKeyInput::Id(category_id.0)),
            };
            let product = match ProductSerializer::validate(store, payload, None).await {
                Ok(product) => product,
                Err(AppError::Validation(errors)) => {
                    return Err(AppError::Fixture(format!(
                        "Invalid product '{}': {}",
                        fixture.name, errors
                    )))
                }
                Err(e) => return Err(e),
            };
            store.insert_product(product).await?;
            products += 1;
        }

        info!(
            categories = category_ids.len(),
            products, "Loaded catalog fixtures"
        );
        Ok((category_ids.len(), products))
    }
}
