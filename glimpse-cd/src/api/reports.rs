//! Crowd feed endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use glimpse_common::models::Report;
use glimpse_common::relative_time::format_relative_now;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitReportRequest {
    #[serde(default)]
    pub author: String,
    pub message: String,
}

/// A report projected for display: timestamp plus rendered relative age
#[derive(Debug, Serialize)]
pub struct ReportView {
    pub id: Uuid,
    pub author: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub age: String,
}

impl From<Report> for ReportView {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            author: report.author,
            message: report.message,
            created_at: report.created_at,
            age: format_relative_now(report.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportListResponse {
    pub facility_id: String,
    pub reports: Vec<ReportView>,
}

/// GET /api/facilities/:id/reports
///
/// Most-recent-first, at most 10 entries; empty list when no reports yet.
pub async fn list_reports(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportListResponse>, ApiError> {
    let reports = state.campus.list_reports(&id).await?;
    Ok(Json(ReportListResponse {
        facility_id: id,
        reports: reports.into_iter().map(ReportView::from).collect(),
    }))
}

/// POST /api/facilities/:id/reports
///
/// Submit a crowd report. Blank messages are rejected; a blank author
/// defaults to the anonymous label.
pub async fn submit_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SubmitReportRequest>,
) -> Result<Json<ReportView>, ApiError> {
    let report = state
        .campus
        .submit_report(&id, &request.author, &request.message)
        .await?;
    Ok(Json(report.into()))
}
