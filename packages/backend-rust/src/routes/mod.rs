mod auth;
mod content;
mod health;
mod progress;
mod wellbeing;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;

use crate::response::json_error;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health::router())
        .nest("/api", content::router())
        .nest("/api/auth", auth::router())
        .nest("/api/progress", progress::router())
        .nest("/api/wellbeing", wellbeing::router())
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found").into_response()
}
