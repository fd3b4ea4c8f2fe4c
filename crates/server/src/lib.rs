use std::sync::Arc;

use axum::Router;
use services::services::website_generator::WebsiteGenerator;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod routes;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<WebsiteGenerator>,
}

impl AppState {
    pub fn new(generator: WebsiteGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

/// Full application router, everything mounted under `/api`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
