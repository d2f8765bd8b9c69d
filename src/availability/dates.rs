//! Free-text date phrases → `YYYY-MM-DD`.

use chrono::{Datelike, Duration, NaiveDate};
use lazy_regex::regex_is_match;

/// Weekday names in scan order; index is days from Monday
const WEEKDAYS: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

/// Resolve a natural-language date phrase relative to `today`.
///
/// Never fails: an unrecognized phrase falls back to tomorrow (logged at warn
/// so the fallback is observable). Phrases already shaped like `YYYY-MM-DD`
/// pass through verbatim, without calendar validation.
pub fn resolve_date_query(query: &str, today: NaiveDate) -> String {
    let q = query.trim().to_lowercase();

    if regex_is_match!(r"^\d{4}-\d{2}-\d{2}", &q) {
        return q;
    }

    let target = if q.contains("tomorrow") {
        today + Duration::days(1)
    } else if q.contains("tonight") || q.contains("today") {
        today
    } else if q.contains("weekend") {
        // Next Saturday; a Saturday "weekend" means next week's, not today
        let mut ahead = (5 + 7 - today.weekday().num_days_from_monday()) % 7;
        if ahead == 0 {
            ahead = 7;
        }
        today + Duration::days(ahead as i64)
    } else if q.contains("next") && let Some(day) = weekday_in(&q) {
        // Strictly after today: "next tuesday" on a Tuesday is +7, never today
        let mut ahead = (day + 7 - today.weekday().num_days_from_monday()) % 7;
        if ahead == 0 {
            ahead = 7;
        }
        today + Duration::days(ahead as i64)
    } else if q.contains("this") && let Some(day) = weekday_in(&q) {
        // Within the current week: "this friday" on a Friday is today
        let ahead = (day + 7 - today.weekday().num_days_from_monday()) % 7;
        today + Duration::days(ahead as i64)
    } else {
        log::warn!("Unrecognized date phrase '{}', defaulting to tomorrow", query.trim());
        today + Duration::days(1)
    };

    target.format("%Y-%m-%d").to_string()
}

/// First weekday name contained in the query, as days from Monday
fn weekday_in(query: &str) -> Option<u32> {
    WEEKDAYS
        .iter()
        .position(|name| query.contains(name))
        .map(|i| i as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-12-16 is a Tuesday
    fn a_tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 16).unwrap()
    }

    #[test]
    fn test_iso_dates_pass_through_verbatim() {
        let today = a_tuesday();
        assert_eq!(resolve_date_query("2025-12-20", today), "2025-12-20");
        assert_eq!(resolve_date_query("  2025-12-20 ", today), "2025-12-20");
        // No calendar validation on passthrough
        assert_eq!(resolve_date_query("2025-13-45", today), "2025-13-45");
    }

    #[test]
    fn test_tomorrow_and_tonight() {
        let today = a_tuesday();
        assert_eq!(resolve_date_query("tomorrow night", today), "2025-12-17");
        assert_eq!(resolve_date_query("tonight", today), "2025-12-16");
        assert_eq!(resolve_date_query("today", today), "2025-12-16");
    }

    #[test]
    fn test_weekend_is_next_saturday() {
        assert_eq!(resolve_date_query("this weekend", a_tuesday()), "2025-12-20");
    }

    #[test]
    fn test_weekend_on_a_saturday_jumps_a_week() {
        let saturday = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        assert_eq!(resolve_date_query("weekend", saturday), "2025-12-27");
    }

    #[test]
    fn test_next_weekday_is_strictly_after_today() {
        // "next tuesday" on a Tuesday is exactly 7 days later, never today
        assert_eq!(resolve_date_query("next tuesday", a_tuesday()), "2025-12-23");
        // On a Monday, "next tuesday" is the very next day
        let monday = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
        assert_eq!(resolve_date_query("next tuesday", monday), "2025-12-16");
    }

    #[test]
    fn test_this_weekday_can_be_today() {
        let friday = NaiveDate::from_ymd_opt(2025, 12, 19).unwrap();
        assert_eq!(resolve_date_query("this friday", friday), "2025-12-19");
        // "this sunday" from a Friday stays within the week
        assert_eq!(resolve_date_query("this sunday", friday), "2025-12-21");
    }

    #[test]
    fn test_first_weekday_token_wins() {
        // Monday is scanned before Friday
        let tuesday = a_tuesday();
        assert_eq!(
            resolve_date_query("next monday or friday", tuesday),
            resolve_date_query("next monday", tuesday)
        );
    }

    #[test]
    fn test_unmatched_phrase_defaults_to_tomorrow() {
        let today = a_tuesday();
        assert_eq!(resolve_date_query("whenever works", today), "2025-12-17");
        assert_eq!(resolve_date_query("", today), "2025-12-17");
    }
}
