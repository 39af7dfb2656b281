//! Domain model types for the Glimpse Campus dashboard
//!
//! A Facility is a tracked physical location (library, food court, lab)
//! with a live status, crowd-sourced reports, and a peer item-request
//! ("beacon") queue held alongside it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Default author label when a report is submitted without a name
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Responder label applied when the current user fulfills a beacon
pub const CURRENT_USER_LABEL: &str = "You";

/// Maximum number of reports retained per facility (oldest evicted first)
pub const MAX_REPORTS_PER_FACILITY: usize = 10;

/// Live status of a facility
///
/// Closed enum: no other value is representable. Status strings arriving
/// from outside (admin UI, vision inference) are parsed through serde or
/// `FromStr` and rejected on mismatch rather than stored uncoerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacilityStatus {
    Open,
    Busy,
    Closed,
    Maintenance,
}

impl FacilityStatus {
    /// All representable statuses, in display order
    pub const ALL: [FacilityStatus; 4] = [
        FacilityStatus::Open,
        FacilityStatus::Busy,
        FacilityStatus::Closed,
        FacilityStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityStatus::Open => "Open",
            FacilityStatus::Busy => "Busy",
            FacilityStatus::Closed => "Closed",
            FacilityStatus::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for FacilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacilityStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(FacilityStatus::Open),
            "Busy" => Ok(FacilityStatus::Busy),
            "Closed" => Ok(FacilityStatus::Closed),
            "Maintenance" => Ok(FacilityStatus::Maintenance),
            other => Err(crate::Error::InvalidStatus(other.to_string())),
        }
    }
}

/// A crowd-sourced free-text status note attached to a facility
///
/// Immutable after creation; created only via the submit operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub author: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Build a new report, substituting the anonymous label for a blank author
    pub fn new(author: &str, message: String) -> Self {
        let author = if author.trim().is_empty() {
            ANONYMOUS_AUTHOR.to_string()
        } else {
            author.trim().to_string()
        };
        Self {
            id: Uuid::new_v4(),
            author,
            message,
            created_at: Utc::now(),
        }
    }
}

/// Lifecycle state of a beacon request: pending until fulfilled, exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeaconStatus {
    Pending,
    Fulfilled,
}

/// A peer-to-peer request for a physical item at a facility
///
/// Status transitions only `Pending -> Fulfilled`, irreversibly. Never
/// deleted; `responder` is set only on fulfillment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeaconRequest {
    pub id: Uuid,
    pub facility_id: String,
    pub item: String,
    pub requester: String,
    pub status: BeaconStatus,
    pub created_at: DateTime<Utc>,
    pub responder: Option<String>,
}

impl BeaconRequest {
    pub fn new(facility_id: &str, item: String, requester: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            facility_id: facility_id.to_string(),
            item,
            requester,
            status: BeaconStatus::Pending,
            created_at: Utc::now(),
            responder: None,
        }
    }
}

/// A tracked physical location with live status and descriptive fields
///
/// `id` and `name` are immutable after creation; the rest is mutated only
/// through the registry update path. Reports are most-recent-first and
/// capped at [`MAX_REPORTS_PER_FACILITY`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
    pub status: FacilityStatus,
    pub description: String,
    pub details: String,
    /// Display color token (hex string), consumed by the map renderer
    pub color: String,
    pub reports: Vec<Report>,
}

impl Facility {
    /// Apply a partial update: fields present in the patch overwrite the
    /// corresponding field, absent fields are untouched.
    pub fn apply(&mut self, patch: FacilityPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(details) = patch.details {
            self.details = details;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Partial update to a facility's mutable fields (shallow merge)
///
/// Status is typed: an unknown status string fails deserialization before
/// it can reach the registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacilityPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FacilityStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Structured result of a vision inference call
///
/// Transient value: merged into a facility's mutable fields on success,
/// never persisted as its own entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueAnalysis {
    pub status: FacilityStatus,
    pub description: String,
    pub details: String,
}
