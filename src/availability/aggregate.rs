//! Batch orchestration: check a list of restaurants and partition the results.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{AvailabilitySource, TimeSlot, filter_by_cutoff};

/// One row of a batch check: a restaurant as sourced from the directory or a
/// CSV list. An empty `venue_id` makes the row ineligible — it is never
/// queried.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchRestaurant {
    pub name: String,
    #[serde(default)]
    pub venue_id: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub notes: String,
}

impl BatchRestaurant {
    pub fn eligible(&self) -> bool {
        !self.venue_id.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailableVenue {
    #[serde(flatten)]
    pub restaurant: BatchRestaurant,
    /// Slots surviving the cutoff, provider order
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnavailableVenue {
    #[serde(flatten)]
    pub restaurant: BatchRestaurant,
    pub reason: String,
}

/// Available/unavailable partitions, both in input order
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub available: Vec<AvailableVenue>,
    pub unavailable: Vec<UnavailableVenue>,
    /// Number of eligible restaurants checked
    pub total: usize,
}

impl BatchReport {
    pub fn summary(&self) -> String {
        format!("{}/{} restaurants available", self.available.len(), self.total)
    }
}

/// Check every eligible restaurant sequentially, in input order. One venue's
/// failure becomes an unavailable entry with a reason; the batch always runs
/// to completion. `delay` is the advisory pause between consecutive provider
/// calls used by bulk workflows.
pub fn check_batch<S: AvailabilitySource + ?Sized>(
    source: &S,
    restaurants: &[BatchRestaurant],
    date: &str,
    party_size: u32,
    max_time: &str,
    delay: Option<Duration>,
    mut progress: impl FnMut(&BatchRestaurant),
) -> BatchReport {
    let mut available = Vec::new();
    let mut unavailable = Vec::new();
    let mut checked = 0usize;

    for restaurant in restaurants {
        if !restaurant.eligible() {
            log::debug!("Skipping '{}': no venue ID", restaurant.name);
            continue;
        }

        if checked > 0 && let Some(pause) = delay {
            std::thread::sleep(pause);
        }
        checked += 1;

        progress(restaurant);
        let result = source.check_availability(&restaurant.venue_id, date, party_size);

        if result.available {
            let slots = filter_by_cutoff(&result.slots, max_time);
            if slots.is_empty() {
                unavailable.push(UnavailableVenue {
                    restaurant: restaurant.clone(),
                    reason: format!("No availability before {max_time}"),
                });
            } else {
                available.push(AvailableVenue {
                    restaurant: restaurant.clone(),
                    slots,
                });
            }
        } else {
            unavailable.push(UnavailableVenue {
                restaurant: restaurant.clone(),
                reason: result.reason().to_string(),
            });
        }
    }

    BatchReport {
        available,
        unavailable,
        total: checked,
    }
}
