//! Time-of-day cutoff for slot lists.

use lazy_regex::regex_is_match;

use super::TimeSlot;

/// Keep slots starting at or before `max_time` (boundary inclusive).
///
/// Both sides are zero-padded 24-hour HH:MM, so lexicographic order equals
/// chronological order within a day. A slot whose time is not HH:MM-shaped is
/// kept rather than dropped (fail-open, logged at warn) — visibility over
/// silent loss.
pub fn filter_by_cutoff(slots: &[TimeSlot], max_time: &str) -> Vec<TimeSlot> {
    slots
        .iter()
        .filter(|slot| {
            if !is_clock_time(&slot.time) {
                log::warn!("Keeping slot with malformed time {:?}", slot.time);
                return true;
            }
            slot.time.as_str() <= max_time
        })
        .cloned()
        .collect()
}

fn is_clock_time(time: &str) -> bool {
    regex_is_match!(r"^\d{2}:\d{2}$", time)
}
