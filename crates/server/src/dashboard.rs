use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use prodline_core::dashboard::DashboardSummary;
use prodline_core::model::TypeCounts;
use prodline_core::query::{OrdersSeries, StoreStatus};

use crate::error::ApiError;
use crate::http::AppState;
use crate::render::{render_dashboard, render_not_found};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let summary = DashboardSummary::compute(state.store.latest_totals()?, &state.settings);
    let by_type = state.store.latest_orders_by_type()?;
    let series = state.store.orders_series()?;
    Ok(Html(render_dashboard(
        &summary,
        &by_type,
        series.as_ref(),
        state.refresh_interval,
    )))
}

pub async fn summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>, ApiError> {
    let totals = state.store.latest_totals()?;
    Ok(Json(DashboardSummary::compute(totals, &state.settings)))
}

/// Line chart data, `null` until the first reading arrives.
pub async fn orders_series(
    State(state): State<AppState>,
) -> Result<Json<Option<OrdersSeries>>, ApiError> {
    Ok(Json(state.store.orders_series()?))
}

/// Bar chart data for the latest reading.
pub async fn products(State(state): State<AppState>) -> Result<Json<TypeCounts>, ApiError> {
    Ok(Json(state.store.latest_orders_by_type()?))
}

pub async fn status(State(state): State<AppState>) -> Result<Json<StoreStatus>, ApiError> {
    Ok(Json(state.store.status()?))
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(render_not_found()))
}
