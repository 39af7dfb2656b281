//! Beacon queue endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use glimpse_common::models::{BeaconRequest, BeaconStatus};
use glimpse_common::relative_time::format_relative_now;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct OpenBeaconRequest {
    pub item: String,
    #[serde(default)]
    pub requester: String,
}

/// A beacon request projected for display
#[derive(Debug, Serialize)]
pub struct BeaconView {
    pub id: Uuid,
    pub facility_id: String,
    pub item: String,
    pub requester: String,
    pub status: BeaconStatus,
    pub created_at: DateTime<Utc>,
    pub age: String,
    pub responder: Option<String>,
}

impl From<BeaconRequest> for BeaconView {
    fn from(beacon: BeaconRequest) -> Self {
        Self {
            id: beacon.id,
            facility_id: beacon.facility_id,
            item: beacon.item,
            requester: beacon.requester,
            status: beacon.status,
            created_at: beacon.created_at,
            age: format_relative_now(beacon.created_at),
            responder: beacon.responder,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BeaconListResponse {
    pub facility_id: String,
    pub beacons: Vec<BeaconView>,
}

/// GET /api/facilities/:id/beacons
///
/// Most-recent-first; empty list for facilities with no requests.
pub async fn list_beacons(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BeaconListResponse>, ApiError> {
    let beacons = state.campus.list_beacons(&id).await?;
    Ok(Json(BeaconListResponse {
        facility_id: id,
        beacons: beacons.into_iter().map(BeaconView::from).collect(),
    }))
}

/// POST /api/facilities/:id/beacons
///
/// Open a peer item-request at a facility. Blank items are rejected.
pub async fn open_beacon(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<OpenBeaconRequest>,
) -> Result<Json<BeaconView>, ApiError> {
    let beacon = state
        .campus
        .open_beacon(&id, &request.item, &request.requester)
        .await?;
    Ok(Json(beacon.into()))
}

/// POST /api/facilities/:id/beacons/:request_id/fulfill
///
/// Fulfill a pending request. Idempotent: re-fulfilling returns success
/// without crediting the score a second time.
pub async fn fulfill_beacon(
    State(state): State<AppState>,
    Path((id, request_id)): Path<(String, Uuid)>,
) -> Result<Json<BeaconView>, ApiError> {
    let beacon = state.campus.fulfill_beacon(request_id, &id).await?;
    Ok(Json(beacon.into()))
}
