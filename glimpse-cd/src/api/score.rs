//! Contribution score endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u64,
}

/// GET /api/score
///
/// The process-wide campus contribution score.
pub async fn get_score(State(state): State<AppState>) -> Json<ScoreResponse> {
    Json(ScoreResponse {
        score: state.campus.score().await,
    })
}
