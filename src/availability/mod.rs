//! Live table availability: date resolution, the Resy client, response
//! normalization, the time cutoff filter and batch aggregation.
//!
//! Everything that can go wrong while checking a venue is converted to data
//! (an `Availability` with `available = false`) rather than an error, so a
//! batch check never aborts partway through on one venue's failure.

mod aggregate;
mod client;
mod dates;
mod filter;
mod normalize;

pub use aggregate::{AvailableVenue, BatchReport, BatchRestaurant, UnavailableVenue, check_batch};
pub use client::{RESY_BASE_URL, ResyClient, ResyCredentials, VenueHit};
pub use dates::resolve_date_query;
pub use filter::filter_by_cutoff;
pub use normalize::normalize;

use serde::{Deserialize, Serialize};

/// One bookable time + seating type as returned by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Start time, HH:MM 24-hour local
    pub time: String,
    /// End time, HH:MM
    pub end_time: String,
    /// Seating/table type label, provider-defined
    #[serde(rename = "type")]
    pub slot_type: String,
    /// Opaque reservation token, pass-through only
    pub token: String,
}

/// Result of one venue/date/party-size query. Ephemeral, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Availability {
    pub available: bool,
    /// Chronological as returned by the provider, never re-sorted
    pub slots: Vec<TimeSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Availability {
    /// Query failed (transport, HTTP status, or parse)
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            available: false,
            slots: Vec::new(),
            message: None,
            error: Some(error.into()),
        }
    }

    /// Query succeeded but nothing is bookable
    pub fn none(message: impl Into<String>) -> Self {
        Self {
            available: false,
            slots: Vec::new(),
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn found(slots: Vec<TimeSlot>) -> Self {
        let message = format!("Found {} available slots", slots.len());
        Self {
            available: true,
            slots,
            message: Some(message),
            error: None,
        }
    }

    /// Why the venue is unavailable: the error if any, else the message
    pub fn reason(&self) -> &str {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or("No availability")
    }
}

/// Seam between the aggregator and the network. `ResyClient` is the real
/// implementation; tests substitute stubs.
pub trait AvailabilitySource {
    fn check_availability(&self, venue_id: &str, date: &str, party_size: u32) -> Availability;
}
