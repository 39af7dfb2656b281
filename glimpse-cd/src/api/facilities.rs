//! Facility registry endpoints, including the administrative override

use axum::{
    extract::{Path, State},
    Json,
};
use glimpse_common::models::{Facility, FacilityPatch};
use glimpse_common::Error;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct FacilityListResponse {
    pub facilities: Vec<Facility>,
}

/// Admin override request: the shared secret plus a facility patch.
///
/// The secret is compared by exact string equality. This is a soft UI
/// gate, not a security boundary.
#[derive(Debug, Deserialize)]
pub struct AdminUpdateRequest {
    pub secret: String,
    #[serde(flatten)]
    pub patch: FacilityPatch,
}

/// GET /api/facilities
///
/// All facilities in stable insertion order.
pub async fn list_facilities(State(state): State<AppState>) -> Json<FacilityListResponse> {
    let facilities = state.campus.list_facilities().await;
    Json(FacilityListResponse { facilities })
}

/// GET /api/facilities/:id
pub async fn get_facility(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Facility>, ApiError> {
    let facility = state.campus.get_facility(&id).await?;
    Ok(Json(facility))
}

/// POST /api/admin/facilities/:id
///
/// Privileged write path: direct shallow merge into any facility's
/// mutable fields, bypassing the crowd-sourced and inference paths.
/// Rejected with 401 when the secret does not match; the facility is
/// left untouched.
pub async fn admin_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AdminUpdateRequest>,
) -> Result<Json<Facility>, ApiError> {
    if request.secret != *state.admin_secret {
        warn!(facility_id = %id, "Admin update rejected: secret mismatch");
        return Err(Error::Unauthorized.into());
    }

    let facility = state.campus.update_facility(&id, request.patch).await?;
    Ok(Json(facility))
}
