use std::time::Duration;

use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use prodline_core::config::Config;
use prodline_core::dashboard::DashboardSettings;
use prodline_store::Store;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::dashboard::{index, not_found, orders_series, products, status, summary};
use crate::submit::submit_data;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub settings: DashboardSettings,
    pub refresh_interval: Duration,
}

impl AppState {
    pub fn new(store: Store, cfg: &Config) -> Self {
        Self {
            store,
            settings: cfg.dashboard(),
            refresh_interval: cfg.refresh_interval,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);
    Router::new()
        .route("/", get(index))
        .route("/submitData", post(submit_data))
        .route("/api/summary", get(summary))
        .route("/api/orders", get(orders_series))
        .route("/api/products", get(products))
        .route("/api/status", get(status))
        .fallback(not_found)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
                .on_response(tower_http::trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
