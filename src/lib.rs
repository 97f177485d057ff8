//! Catalog Service
//!
//! A REST service exposing product categories and products with field
//! validation and protected deletion of referenced categories.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;

pub use error::{AppError, Result};

use std::sync::Arc;

use catalog::CatalogStore;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: config::Settings,
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    pub fn new(settings: config::Settings, store: Arc<dyn CatalogStore>) -> Self {
        Self { settings, store }
    }
}
