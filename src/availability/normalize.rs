//! Flatten the provider's nested find response into `Availability`.

use serde::Deserialize;

use super::{Availability, TimeSlot};

// Consumed shape:
// { results: { venues: [ { slots: [ { date: {start, end}, config: {type, token} } ] } ] } }
//
// Every field is defaulted so partial payloads normalize instead of erroring;
// only malformed JSON (or wrong types) reaches the parse-error path.

#[derive(Debug, Default, Deserialize)]
struct FindResponse {
    #[serde(default)]
    results: FindResults,
}

#[derive(Debug, Default, Deserialize)]
struct FindResults {
    #[serde(default)]
    venues: Vec<RawVenue>,
}

#[derive(Debug, Default, Deserialize)]
struct RawVenue {
    #[serde(default)]
    slots: Vec<RawSlot>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSlot {
    #[serde(default)]
    date: SlotWindow,
    #[serde(default)]
    config: SlotConfig,
}

#[derive(Debug, Default, Deserialize)]
struct SlotWindow {
    start: Option<String>,
    end: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SlotConfig {
    #[serde(rename = "type")]
    slot_type: Option<String>,
    token: Option<String>,
}

/// Normalize a raw find-endpoint body. Soft-fails on anything: a body that
/// does not parse becomes `available = false` with a "Parse error" message,
/// never an `Err`.
pub fn normalize(body: &str) -> Availability {
    let response: FindResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Provider response did not parse: {}", e);
            return Availability::failed(format!("Parse error: {e}"));
        }
    };

    let venues = response.results.venues;
    if venues.is_empty() {
        return Availability::none("No availability");
    }

    // Queried per single venue, so exactly one is expected
    let venue = venues.into_iter().next().unwrap_or_default();
    if venue.slots.is_empty() {
        return Availability::none("No time slots available");
    }

    let slots: Vec<TimeSlot> = venue
        .slots
        .into_iter()
        .map(|slot| TimeSlot {
            time: clock_time(slot.date.start.as_deref()),
            end_time: clock_time(slot.date.end.as_deref()),
            slot_type: slot.config.slot_type.unwrap_or_else(|| "Standard".to_string()),
            token: slot.config.token.unwrap_or_default(),
        })
        .collect();

    Availability::found(slots)
}

/// Clock component of a provider timestamp ("YYYY-MM-DD HH:MM:SS" → "HH:MM").
/// A missing timestamp yields an empty string, which sorts before any cutoff.
fn clock_time(timestamp: Option<&str>) -> String {
    let Some(timestamp) = timestamp else {
        return String::new();
    };
    let tail = timestamp.split_whitespace().last().unwrap_or(timestamp);
    tail.chars().take(5).collect()
}
