use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use prodline_core::error::ProdlineError;
use prodline_core::model::Reading;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitAck {
    pub message: String,
}

/// `POST /submitData`: one reading in, one row out.
pub async fn submit_data(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SubmitAck>), ApiError> {
    let reading: Reading = serde_json::from_slice(&body)
        .map_err(|e| ProdlineError::Parse(format!("invalid reading payload: {e}")))?;

    state.store.insert_reading(&reading)?;
    tracing::info!(
        time = %reading.time,
        orders = reading.orders.total(),
        defects = reading.defects.total(),
        "reading accepted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitAck {
            message: "Data received".to_string(),
        }),
    ))
}
