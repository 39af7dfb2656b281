//! Fixed seed data set
//!
//! All state is ephemeral: the registry is reinitialized from this data
//! at every process start.

use glimpse_common::models::{Facility, FacilityStatus};

fn facility(
    id: &str,
    name: &str,
    status: FacilityStatus,
    description: &str,
    details: &str,
    color: &str,
) -> Facility {
    Facility {
        id: id.to_string(),
        name: name.to_string(),
        status,
        description: description.to_string(),
        details: details.to_string(),
        color: color.to_string(),
        reports: Vec::new(),
    }
}

/// The nine campus facilities tracked by the dashboard
pub fn seed_facilities() -> Vec<Facility> {
    use FacilityStatus::*;

    vec![
        facility("1", "Library", Open, "Silent zone available", "45% Capacity", "#059669"),
        facility(
            "2",
            "Food Court",
            Busy,
            "Fresh Pasta & Salad Bar",
            "High Traffic • 15min wait",
            "#EA580C",
        ),
        facility("3", "Badminton Court", Open, "Court 3 & 4 Free", "Book via App", "#0EA5E9"),
        facility("4", "Comp Lab A", Maintenance, "System Upgrades", "Closed until 2 PM", "#DC2626"),
        facility("5", "Auditorium", Closed, "Event Setup: Tech Talk", "Opens at 5 PM", "#7C3AED"),
        facility(
            "6",
            "Health Centre",
            Open,
            "General Physician Available",
            "Walk-ins Welcome",
            "#BE123C",
        ),
        facility(
            "7",
            "Chemistry Lab",
            Busy,
            "Practical Session in progress",
            "Restricted Access",
            "#4338CA",
        ),
        facility(
            "8",
            "Parking Lot B",
            Open,
            "Spaces available near Block C",
            "120/200 Slots Free",
            "#64748B",
        ),
        facility("9", "Gymnasium", Open, "Cardio section free", "Low Occupancy", "#0D9488"),
    ]
}
