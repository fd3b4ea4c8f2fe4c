use axum::Router;

use crate::AppState;

pub mod generate_code;
pub mod health;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(generate_code::router())
        .merge(health::router())
}
