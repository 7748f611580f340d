pub mod auth;
pub mod config;
pub mod content;
pub mod logging;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::state::AppState;
use crate::store::{FlatFileStore, StoreError};

pub fn create_app(config: &Config) -> Result<axum::Router, StoreError> {
    let store = Arc::new(FlatFileStore::open(&config.data_dir)?);
    let state = AppState::new(store);

    Ok(routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()))
}
