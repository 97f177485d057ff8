//! HTTP route definitions

use crate::api::handlers;
use crate::api::serializers::{CategorySerializer, ProductSerializer, Resource};
use crate::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Registers a resource's routes under a path prefix
pub type Mount = fn(Router<Arc<AppState>>, &'static str) -> Router<Arc<AppState>>;

/// Every resource served by the API, keyed by path prefix
pub const RESOURCES: &[(&str, Mount)] = &[
    ("/categories", mount::<CategorySerializer>),
    ("/products", mount::<ProductSerializer>),
];

/// Add list/create on `prefix` and retrieve/update/delete on `prefix/:id`
pub fn mount<R: Resource>(router: Router<Arc<AppState>>, prefix: &'static str) -> Router<Arc<AppState>> {
    router
        .route(prefix, get(handlers::list::<R>).post(handlers::create::<R>))
        .route(
            &format!("{}/:id", prefix),
            get(handlers::retrieve::<R>)
                .put(handlers::update::<R>)
                .patch(handlers::partial_update::<R>)
                .delete(handlers::destroy::<R>),
        )
}

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = RESOURCES
        .iter()
        .fold(Router::new(), |router, &(prefix, mount)| mount(router, prefix));

    Router::new()
        // API root listing the registered resources
        .route("/", get(handlers::api_root))
        // Health check endpoint
        .route("/health", get(handlers::health_check))
        .merge(api_routes)
        // Add shared state
        .with_state(state)
        // Add tracing layer
        .layer(TraceLayer::new_for_http())
}
