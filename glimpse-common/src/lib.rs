//! # Glimpse Common Library
//!
//! Shared code for the Glimpse Campus dashboard service including:
//! - Domain model types (facilities, reports, beacon requests)
//! - Event types (GlimpseEvent enum)
//! - Error types
//! - Configuration loading
//! - Relative time formatting

pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod relative_time;

pub use error::{Error, Result};
pub use models::FacilityStatus;
