//! Event types for the Glimpse event system
//!
//! Broadcast to SSE clients whenever a facility, feed, beacon, or score
//! mutation lands, so dashboards can refresh without polling.

use crate::models::{BeaconRequest, Facility, Report};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Glimpse event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GlimpseEvent {
    /// A facility's mutable fields changed (admin, registry, or inference path)
    FacilityUpdated {
        facility: Facility,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A crowd report was accepted into a facility's feed
    ReportSubmitted {
        facility_id: String,
        report: Report,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A new beacon request was opened
    BeaconOpened {
        beacon: BeaconRequest,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A pending beacon request was fulfilled
    BeaconFulfilled {
        facility_id: String,
        request_id: Uuid,
        responder: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The campus contribution score changed
    ScoreChanged {
        score: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl GlimpseEvent {
    /// Event type string for the SSE `event:` field
    pub fn type_str(&self) -> &'static str {
        match self {
            GlimpseEvent::FacilityUpdated { .. } => "FacilityUpdated",
            GlimpseEvent::ReportSubmitted { .. } => "ReportSubmitted",
            GlimpseEvent::BeaconOpened { .. } => "BeaconOpened",
            GlimpseEvent::BeaconFulfilled { .. } => "BeaconFulfilled",
            GlimpseEvent::ScoreChanged { .. } => "ScoreChanged",
        }
    }
}
