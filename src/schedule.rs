//! Past/upcoming classification of shows.
//!
//! Whether a show is upcoming is never stored: it is decided at read time by
//! comparing its start time with the clock the caller supplies.

use std::collections::HashMap;

use sea_orm::entity::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use uuid::Uuid;

/// A show starting exactly now still counts as upcoming.
pub fn is_upcoming(start_time: &DateTimeWithTimeZone, now: &DateTimeWithTimeZone) -> bool {
    start_time >= now
}

/// Splits `items` into `(past, upcoming)`, keeping their relative order.
pub fn partition<T>(
    items: impl IntoIterator<Item = T>,
    now: &DateTimeWithTimeZone,
    start_time: impl Fn(&T) -> &DateTimeWithTimeZone,
) -> (Vec<T>, Vec<T>) {
    let (upcoming, past): (Vec<T>, Vec<T>) = items
        .into_iter()
        .partition(|item| is_upcoming(start_time(item), now));
    (past, upcoming)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShowTally {
    pub total: u64,
    pub upcoming: u64,
}

/// Counts shows per owner (venue or artist) from `(owner_id, start_time)`
/// rows. Owners without shows are simply absent from the map.
pub fn tally(
    rows: impl IntoIterator<Item = (Uuid, DateTimeWithTimeZone)>,
    now: &DateTimeWithTimeZone,
) -> HashMap<Uuid, ShowTally> {
    let mut tallies: HashMap<Uuid, ShowTally> = HashMap::new();
    for (owner, start_time) in rows {
        let entry = tallies.entry(owner).or_default();
        entry.total += 1;
        if is_upcoming(&start_time, now) {
            entry.upcoming += 1;
        }
    }
    tallies
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset, TimeZone};
    use uuid::Uuid;

    use super::*;

    fn now() -> DateTimeWithTimeZone {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 20, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    #[test]
    fn start_time_equal_to_now_is_upcoming() {
        let now = now();
        assert!(is_upcoming(&now, &now));
        assert!(!is_upcoming(&(now - Duration::seconds(1)), &now));
    }

    #[test]
    fn comparison_ignores_the_offset_of_either_side() {
        let now = now();
        let same_instant_elsewhere = now.with_timezone(
            &FixedOffset::west_opt(8 * 3600).expect("offset should be valid"),
        );
        assert!(is_upcoming(&same_instant_elsewhere, &now));
    }

    #[test]
    fn partition_keeps_order_within_each_side() {
        let now = now();
        let times = vec![
            now - Duration::days(2),
            now + Duration::days(1),
            now - Duration::days(1),
            now + Duration::days(3),
        ];

        let (past, upcoming) = partition(times.clone(), &now, |ts| ts);
        assert_eq!(past, vec![times[0], times[2]]);
        assert_eq!(upcoming, vec![times[1], times[3]]);
    }

    #[test]
    fn tally_counts_total_and_upcoming_per_owner() {
        let now = now();
        let hop = Uuid::new_v4();
        let park = Uuid::new_v4();
        let rows = vec![
            (hop, now - Duration::days(10)),
            (hop, now + Duration::days(10)),
            (hop, now + Duration::hours(1)),
            (park, now - Duration::hours(1)),
        ];

        let tallies = tally(rows, &now);
        assert_eq!(tallies[&hop], ShowTally { total: 3, upcoming: 2 });
        assert_eq!(tallies[&park], ShowTally { total: 1, upcoming: 0 });
        assert!(!tallies.contains_key(&Uuid::new_v4()));
    }
}
