//! Picking one entry out of a forecast series.

use chrono::{Local, NaiveDate, NaiveTime, TimeZone};

/// Unix timestamp of noon on `date` in the local time zone.
pub fn noon_timestamp(date: NaiveDate) -> i64 {
    noon_timestamp_in(date, &Local)
}

/// Unix timestamp of noon on `date` in `tz`.
pub fn noon_timestamp_in<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    let noon = date
        .and_hms_opt(12, 0, 0)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN));
    tz.from_local_datetime(&noon)
        .earliest()
        .map(|t| t.timestamp())
        .unwrap_or_else(|| noon.and_utc().timestamp())
}

/// Position of the entry whose timestamp is nearest `target`. On a tie the
/// earlier entry in the slice wins.
pub fn closest_index_to_target<T>(
    entries: &[T],
    target: i64,
    timestamp: impl Fn(&T) -> i64,
) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (index, entry) in entries.iter().enumerate() {
        let delta = timestamp(entry).abs_diff(target);
        match best {
            Some((_, best_delta)) if delta >= best_delta => {}
            _ => best = Some((index, delta)),
        }
    }
    best.map(|(index, _)| index)
}

/// The entry whose timestamp is nearest `target`.
pub fn closest_to_target<T>(entries: &[T], target: i64, timestamp: impl Fn(&T) -> i64) -> Option<&T> {
    closest_index_to_target(entries, target, timestamp).and_then(|i| entries.get(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_picks_minimum_absolute_difference() {
        let entries = [100_i64, 200, 500];
        let chosen = closest_to_target(&entries, 180, |dt| *dt);
        assert_eq!(chosen, Some(&200));
    }

    #[test]
    fn test_tie_resolved_by_first_entry() {
        let entries = [(1, 160_i64), (2, 200), (3, 180 + 20)];
        let chosen = closest_to_target(&entries, 180, |e| e.1);
        assert_eq!(chosen.map(|e| e.0), Some(1));
    }

    #[test]
    fn test_target_outside_range() {
        let entries = [100_i64, 200, 500];
        assert_eq!(closest_to_target(&entries, 10_000, |dt| *dt), Some(&500));
        assert_eq!(closest_to_target(&entries, -50, |dt| *dt), Some(&100));
    }

    #[test]
    fn test_index_variant() {
        let entries = [100_i64, 200, 500];
        assert_eq!(closest_index_to_target(&entries, 180, |dt| *dt), Some(1));
    }

    #[test]
    fn test_empty_series() {
        let entries: [i64; 0] = [];
        assert!(closest_to_target(&entries, 0, |dt| *dt).is_none());
    }

    #[test]
    fn test_noon_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
        // 2024-09-08T12:00:00Z
        assert_eq!(noon_timestamp_in(date, &Utc), 1_725_796_800);
    }

    #[test]
    fn test_noon_with_offset() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
        let eastern = FixedOffset::west_opt(4 * 3600).unwrap();
        assert_eq!(noon_timestamp_in(date, &eastern), 1_725_796_800 + 4 * 3600);
    }
}
