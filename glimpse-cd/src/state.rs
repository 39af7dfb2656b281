//! Shared campus state
//!
//! Single source of truth for every facility's status, its crowd report
//! feed, the per-facility beacon queue, and the campus contribution score.
//! All write paths (admin edits, crowd submissions, beacon lifecycle,
//! inference results) funnel through the operations here; there is no
//! direct external mutation of state.
//!
//! One `RwLock` guards the whole `CampusState`, so every mutation is
//! atomic from the caller's perspective and total-ordered by invocation.

use glimpse_common::events::GlimpseEvent;
use glimpse_common::models::{
    BeaconRequest, BeaconStatus, Facility, FacilityPatch, QueueAnalysis, Report,
    CURRENT_USER_LABEL, MAX_REPORTS_PER_FACILITY,
};
use glimpse_common::{Error, Result};
use std::collections::HashMap;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

/// Contribution score at process start
pub const BASE_SCORE: u64 = 100;

/// Points for submitting a crowd report
pub const REPORT_POINTS: u64 = 5;

/// Points for a successful AI-assisted status update (rewards verified
/// data above self-reporting)
pub const INFERENCE_POINTS: u64 = 15;

/// Points for fulfilling a beacon request (rewards direct peer assistance
/// above posting)
pub const FULFILL_POINTS: u64 = 25;

/// In-memory campus state: facilities in insertion order, beacon queues
/// keyed by facility id, and the running contribution score.
///
/// Beacon queues live outside the Facility record so the request queue
/// stays independently indexable by facility id.
struct CampusState {
    facilities: Vec<Facility>,
    beacons: HashMap<String, Vec<BeaconRequest>>,
    score: u64,
}

impl CampusState {
    fn facility_mut(&mut self, id: &str) -> Result<&mut Facility> {
        self.facilities
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| Error::NotFound(format!("facility {}", id)))
    }

    fn facility(&self, id: &str) -> Result<&Facility> {
        self.facilities
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| Error::NotFound(format!("facility {}", id)))
    }
}

/// Shared state accessible by all HTTP handlers
pub struct SharedState {
    inner: RwLock<CampusState>,
    /// Event broadcaster for SSE clients
    event_tx: broadcast::Sender<GlimpseEvent>,
}

impl SharedState {
    /// Create shared state seeded with the given facilities
    pub fn new(seed: Vec<Facility>) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            inner: RwLock::new(CampusState {
                facilities: seed,
                beacons: HashMap::new(),
                score: BASE_SCORE,
            }),
            event_tx,
        }
    }

    /// Broadcast an event to all SSE listeners (no receivers is OK)
    fn broadcast_event(&self, event: GlimpseEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Subscribe to the event stream for SSE
    pub fn subscribe_events(&self) -> broadcast::Receiver<GlimpseEvent> {
        self.event_tx.subscribe()
    }

    // ------------------------------------------------------------------
    // Facility registry
    // ------------------------------------------------------------------

    /// All facilities in insertion order (stable across updates)
    pub async fn list_facilities(&self) -> Vec<Facility> {
        self.inner.read().await.facilities.clone()
    }

    /// Look up a single facility by id
    pub async fn get_facility(&self, id: &str) -> Result<Facility> {
        Ok(self.inner.read().await.facility(id)?.clone())
    }

    /// Shallow-merge a partial update into a facility's mutable fields.
    ///
    /// Every successful update is immediately visible to all readers.
    pub async fn update_facility(&self, id: &str, patch: FacilityPatch) -> Result<Facility> {
        let updated = {
            let mut state = self.inner.write().await;
            let facility = state.facility_mut(id)?;
            facility.apply(patch);
            facility.clone()
        };

        self.broadcast_event(GlimpseEvent::FacilityUpdated {
            facility: updated.clone(),
            timestamp: chrono::Utc::now(),
        });

        Ok(updated)
    }

    // ------------------------------------------------------------------
    // Crowd feed
    // ------------------------------------------------------------------

    /// Submit a crowd report to a facility's feed.
    ///
    /// The report is prepended (most-recent-first) and the feed truncated
    /// to the 10 most recent entries, oldest evicted first. Credits the
    /// contribution score by [`REPORT_POINTS`].
    pub async fn submit_report(
        &self,
        facility_id: &str,
        author: &str,
        message: &str,
    ) -> Result<Report> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::EmptyInput("report message".to_string()));
        }

        let (report, score) = {
            let mut guard = self.inner.write().await;
            let state = &mut *guard;
            let facility = state.facility_mut(facility_id)?;

            let report = Report::new(author, message.to_string());
            facility.reports.insert(0, report.clone());
            facility.reports.truncate(MAX_REPORTS_PER_FACILITY);

            state.score += REPORT_POINTS;
            (report, state.score)
        };

        tracing::info!(facility_id, author = %report.author, "Crowd report accepted");

        self.broadcast_event(GlimpseEvent::ReportSubmitted {
            facility_id: facility_id.to_string(),
            report: report.clone(),
            timestamp: chrono::Utc::now(),
        });
        self.broadcast_event(GlimpseEvent::ScoreChanged {
            score,
            timestamp: chrono::Utc::now(),
        });

        Ok(report)
    }

    /// A facility's report feed, most-recent-first, at most 10 entries
    pub async fn list_reports(&self, facility_id: &str) -> Result<Vec<Report>> {
        Ok(self.inner.read().await.facility(facility_id)?.reports.clone())
    }

    // ------------------------------------------------------------------
    // Beacon queue
    // ------------------------------------------------------------------

    /// Open a beacon request for an item at a facility.
    ///
    /// The new request starts `Pending` and is prepended to that
    /// facility's queue.
    pub async fn open_beacon(
        &self,
        facility_id: &str,
        item: &str,
        requester: &str,
    ) -> Result<BeaconRequest> {
        let item = item.trim();
        if item.is_empty() {
            return Err(Error::EmptyInput("beacon item".to_string()));
        }

        let beacon = {
            let mut guard = self.inner.write().await;
            let state = &mut *guard;
            // Queues are keyed by facility id; refuse ids the registry
            // does not know rather than growing orphan queues
            state.facility(facility_id)?;

            let beacon =
                BeaconRequest::new(facility_id, item.to_string(), requester.trim().to_string());
            state
                .beacons
                .entry(facility_id.to_string())
                .or_default()
                .insert(0, beacon.clone());
            beacon
        };

        tracing::info!(facility_id, item = %beacon.item, "Beacon opened");

        self.broadcast_event(GlimpseEvent::BeaconOpened {
            beacon: beacon.clone(),
            timestamp: chrono::Utc::now(),
        });

        Ok(beacon)
    }

    /// Fulfill a pending beacon request, crediting [`FULFILL_POINTS`].
    ///
    /// Idempotent: fulfilling an already-fulfilled request returns it
    /// unchanged and does not credit the score again.
    pub async fn fulfill_beacon(
        &self,
        request_id: Uuid,
        facility_id: &str,
    ) -> Result<BeaconRequest> {
        let (beacon, credited, score) = {
            let mut guard = self.inner.write().await;
            let state = &mut *guard;
            let queue = state
                .beacons
                .get_mut(facility_id)
                .ok_or_else(|| Error::NotFound(format!("beacon queue for facility {}", facility_id)))?;
            let beacon = queue
                .iter_mut()
                .find(|b| b.id == request_id)
                .ok_or_else(|| Error::NotFound(format!("beacon request {}", request_id)))?;

            if beacon.status == BeaconStatus::Fulfilled {
                (beacon.clone(), false, state.score)
            } else {
                beacon.status = BeaconStatus::Fulfilled;
                beacon.responder = Some(CURRENT_USER_LABEL.to_string());
                let beacon = beacon.clone();
                state.score += FULFILL_POINTS;
                (beacon, true, state.score)
            }
        };

        if credited {
            self.broadcast_event(GlimpseEvent::BeaconFulfilled {
                facility_id: facility_id.to_string(),
                request_id,
                responder: CURRENT_USER_LABEL.to_string(),
                timestamp: chrono::Utc::now(),
            });
            self.broadcast_event(GlimpseEvent::ScoreChanged {
                score,
                timestamp: chrono::Utc::now(),
            });
        }

        Ok(beacon)
    }

    /// A facility's beacon queue, most-recent-first, empty when none
    pub async fn list_beacons(&self, facility_id: &str) -> Result<Vec<BeaconRequest>> {
        let state = self.inner.read().await;
        state.facility(facility_id)?;
        Ok(state.beacons.get(facility_id).cloned().unwrap_or_default())
    }

    // ------------------------------------------------------------------
    // Contribution score
    // ------------------------------------------------------------------

    /// Current campus contribution score
    pub async fn score(&self) -> u64 {
        self.inner.read().await.score
    }

    // ------------------------------------------------------------------
    // Inference results
    // ------------------------------------------------------------------

    /// Merge a validated vision inference result into a facility.
    ///
    /// All-or-nothing: the facility lookup and field merge happen under a
    /// single write guard, and the score is only credited when the merge
    /// lands. The "verified by AI" marker is appended to the details.
    pub async fn apply_analysis(
        &self,
        facility_id: &str,
        analysis: QueueAnalysis,
    ) -> Result<Facility> {
        let (updated, score) = {
            let mut guard = self.inner.write().await;
            let state = &mut *guard;
            let facility = state.facility_mut(facility_id)?;

            facility.apply(FacilityPatch {
                status: Some(analysis.status),
                description: Some(analysis.description),
                details: Some(format!("{} • Verified by AI", analysis.details.trim())),
                color: None,
            });
            let updated = facility.clone();

            state.score += INFERENCE_POINTS;
            (updated, state.score)
        };

        tracing::info!(facility_id, status = %updated.status, "AI-verified status applied");

        self.broadcast_event(GlimpseEvent::FacilityUpdated {
            facility: updated.clone(),
            timestamp: chrono::Utc::now(),
        });
        self.broadcast_event(GlimpseEvent::ScoreChanged {
            score,
            timestamp: chrono::Utc::now(),
        });

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_facilities;
    use glimpse_common::models::{FacilityStatus, ANONYMOUS_AUTHOR};

    fn test_state() -> SharedState {
        SharedState::new(seed_facilities())
    }

    #[tokio::test]
    async fn test_list_is_insertion_ordered_and_unique() {
        let state = test_state();
        let facilities = state.list_facilities().await;

        let ids: Vec<&str> = facilities.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "8", "9"]);

        // Updating a facility does not reorder the list
        state
            .update_facility(
                "5",
                FacilityPatch {
                    status: Some(FacilityStatus::Open),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let after: Vec<String> = state
            .list_facilities()
            .await
            .iter()
            .map(|f| f.id.clone())
            .collect();
        assert_eq!(ids, after.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_update_unknown_facility() {
        let state = test_state();
        let result = state.update_facility("999", FacilityPatch::default()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_visible_to_readers() {
        let state = test_state();
        state
            .update_facility(
                "4",
                FacilityPatch {
                    status: Some(FacilityStatus::Open),
                    details: Some("Back online".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let facility = state.get_facility("4").await.unwrap();
        assert_eq!(facility.status, FacilityStatus::Open);
        assert_eq!(facility.details, "Back online");
        // Immutable and absent fields untouched
        assert_eq!(facility.name, "Comp Lab A");
        assert_eq!(facility.description, "System Upgrades");
    }

    #[tokio::test]
    async fn test_submit_report_defaults_and_scores() {
        let state = test_state();
        let report = state.submit_report("1", "", "too loud").await.unwrap();

        assert_eq!(report.author, ANONYMOUS_AUTHOR);
        assert_eq!(report.message, "too loud");
        assert_eq!(state.list_reports("1").await.unwrap().len(), 1);
        assert_eq!(state.score().await, BASE_SCORE + REPORT_POINTS);
    }

    #[tokio::test]
    async fn test_blank_report_rejected() {
        let state = test_state();
        assert!(matches!(
            state.submit_report("1", "Jane", "   ").await,
            Err(Error::EmptyInput(_))
        ));
        // Nothing enqueued, nothing credited
        assert!(state.list_reports("1").await.unwrap().is_empty());
        assert_eq!(state.score().await, BASE_SCORE);
    }

    #[tokio::test]
    async fn test_feed_caps_at_ten_most_recent() {
        let state = test_state();
        for i in 0..11 {
            state
                .submit_report("1", "Jane", &format!("update {}", i))
                .await
                .unwrap();
        }

        let reports = state.list_reports("1").await.unwrap();
        assert_eq!(reports.len(), 10);
        // Most-recent-first: the oldest ("update 0") was evicted
        assert_eq!(reports[0].message, "update 10");
        assert_eq!(reports[9].message, "update 1");
    }

    #[tokio::test]
    async fn test_beacon_lifecycle() {
        let state = test_state();
        let beacon = state.open_beacon("2", "Charger", "Jane").await.unwrap();
        assert_eq!(beacon.status, BeaconStatus::Pending);

        let fulfilled = state.fulfill_beacon(beacon.id, "2").await.unwrap();
        assert_eq!(fulfilled.status, BeaconStatus::Fulfilled);
        assert_eq!(fulfilled.responder.as_deref(), Some(CURRENT_USER_LABEL));
        assert_eq!(state.score().await, BASE_SCORE + FULFILL_POINTS);
    }

    #[tokio::test]
    async fn test_fulfill_is_idempotent() {
        let state = test_state();
        let beacon = state.open_beacon("2", "Charger", "Jane").await.unwrap();

        let first = state.fulfill_beacon(beacon.id, "2").await.unwrap();
        let second = state.fulfill_beacon(beacon.id, "2").await.unwrap();

        assert_eq!(first.status, BeaconStatus::Fulfilled);
        assert_eq!(second.status, BeaconStatus::Fulfilled);
        // Second call is a no-op on the score
        assert_eq!(state.score().await, BASE_SCORE + FULFILL_POINTS);
    }

    #[tokio::test]
    async fn test_blank_beacon_item_rejected() {
        let state = test_state();
        assert!(matches!(
            state.open_beacon("2", "  ", "Jane").await,
            Err(Error::EmptyInput(_))
        ));
        assert!(state.list_beacons("2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fulfill_unknown_request() {
        let state = test_state();
        state.open_beacon("2", "Charger", "Jane").await.unwrap();

        let result = state.fulfill_beacon(Uuid::new_v4(), "2").await;
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(state.score().await, BASE_SCORE);
    }

    #[tokio::test]
    async fn test_beacons_are_most_recent_first() {
        let state = test_state();
        state.open_beacon("3", "Racket", "Sam").await.unwrap();
        state.open_beacon("3", "Shuttlecock", "Priya").await.unwrap();

        let queue = state.list_beacons("3").await.unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].item, "Shuttlecock");
        assert_eq!(queue[1].item, "Racket");
    }

    #[tokio::test]
    async fn test_apply_analysis_merges_and_marks() {
        let state = test_state();
        let updated = state
            .apply_analysis(
                "2",
                QueueAnalysis {
                    status: FacilityStatus::Busy,
                    description: "Line extending to hallway".to_string(),
                    details: "Est. Wait: 12 mins".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, FacilityStatus::Busy);
        assert_eq!(updated.description, "Line extending to hallway");
        assert_eq!(updated.details, "Est. Wait: 12 mins • Verified by AI");
        assert_eq!(state.score().await, BASE_SCORE + INFERENCE_POINTS);
    }

    #[tokio::test]
    async fn test_apply_analysis_unknown_facility_mutates_nothing() {
        let state = test_state();
        let before = state.list_facilities().await;

        let result = state
            .apply_analysis(
                "999",
                QueueAnalysis {
                    status: FacilityStatus::Closed,
                    description: "x".to_string(),
                    details: "y".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(state.score().await, BASE_SCORE);
        let after = state.list_facilities().await;
        for (b, a) in before.iter().zip(after.iter()) {
            assert_eq!(b.status, a.status);
            assert_eq!(b.details, a.details);
        }
    }

    #[tokio::test]
    async fn test_score_accumulates_regardless_of_order() {
        let state = test_state();

        let beacon = state.open_beacon("2", "Charger", "Jane").await.unwrap();
        state.fulfill_beacon(beacon.id, "2").await.unwrap();
        state
            .apply_analysis(
                "1",
                QueueAnalysis {
                    status: FacilityStatus::Open,
                    description: "Quiet".to_string(),
                    details: "Plenty of seats".to_string(),
                },
            )
            .await
            .unwrap();
        state.submit_report("1", "Jane", "confirmed").await.unwrap();

        assert_eq!(
            state.score().await,
            BASE_SCORE + REPORT_POINTS + INFERENCE_POINTS + FULFILL_POINTS
        );
    }

    #[tokio::test]
    async fn test_events_broadcast_on_mutation() {
        let state = test_state();
        let mut rx = state.subscribe_events();

        state.submit_report("1", "Jane", "busy again").await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.type_str(), "ReportSubmitted");
        let event = rx.recv().await.unwrap();
        assert_eq!(event.type_str(), "ScoreChanged");
    }
}
