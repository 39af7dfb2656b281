//! AI-assisted status update endpoint

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use glimpse_common::models::Facility;
use glimpse_common::Error;

use crate::api::ApiError;
use crate::AppState;

/// POST /api/facilities/:id/analyze
///
/// Body: raw photo bytes (conventionally JPEG). On success the validated
/// classification is merged into the facility with the AI-verified marker
/// and the contribution score is credited. Any inference failure leaves
/// the facility untouched; the update is all-or-nothing.
pub async fn analyze_facility(
    State(state): State<AppState>,
    Path(id): Path<String>,
    photo: Bytes,
) -> Result<Json<Facility>, ApiError> {
    // Fail fast on bad input before spending a network round trip
    state.campus.get_facility(&id).await?;
    if photo.is_empty() {
        return Err(Error::EmptyInput("photo".to_string()).into());
    }

    let analysis = state.vision.classify(&photo).await?;
    let facility = state.campus.apply_analysis(&id, analysis).await?;
    Ok(Json(facility))
}
