//! API module - HTTP routes, handlers, serializers, and models

pub mod handlers;
pub mod models;
pub mod routes;
pub mod serializers;
pub mod validation;
