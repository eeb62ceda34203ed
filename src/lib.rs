pub mod catalog;
pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub catalog: catalog::CatalogService,
    pub sessions: services::sessions::SessionStore,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        Arc::new(Self {
            catalog: catalog::CatalogService::seeded(),
            sessions: services::sessions::SessionStore::new(),
            config,
        })
    }
}

/// Главный роутер: служебные маршруты и API под `/api`.
pub fn router(state: Arc<AppState>) -> Router {
    let app = Router::new()
        .route("/", get(|| async { "Eventify Storefront API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes(&state.config.features))
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http());

    if state.config.app.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
