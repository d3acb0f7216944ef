//! # Festival Calendar
//!
//! Fixed month/day calendar of the festivals the surge model tracks, plus
//! a nearest-festival lookup used to flag dates that fall inside a
//! festival window.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Festivals observed every year on a fixed month/day.
const BASE_FESTIVALS: &[(&str, u32, u32)] = &[
    ("New Year", 1, 1),
    ("Makar Sankranti", 1, 14),
    ("Republic Day", 1, 26),
    ("Holi", 3, 14),
    ("Eid al-Fitr", 4, 1),
    ("Ganesh Chaturthi", 9, 7),
    ("Navratri", 10, 2),
    ("Dussehra", 10, 12),
    ("Diwali", 10, 21),
    ("Christmas", 12, 25),
];

/// One calendar entry for a concrete year.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    pub name: String,
    pub date: NaiveDate,
}

/// The festival closest to a queried date, if any fell within the window.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyFestival {
    pub name: String,
    pub date: NaiveDate,
    /// Signed distance in days; negative when the festival already passed.
    pub days_away: i64,
}

/// Result of a festival-window query.
#[derive(Debug, Clone, Serialize)]
pub struct FestivalWindow {
    pub is_festival_nearby: bool,
    pub festival: Option<NearbyFestival>,
}

/// All tracked festivals placed into a concrete year.
pub fn calendar_for_year(year: i32) -> Vec<CalendarEntry> {
    BASE_FESTIVALS
        .iter()
        .filter_map(|&(name, month, day)| {
            NaiveDate::from_ymd_opt(year, month, day).map(|date| CalendarEntry {
                name: name.to_string(),
                date,
            })
        })
        .collect()
}

/// Find the festival closest to `target` within `window_days`.
///
/// Scans the previous, current, and next year so windows that straddle a
/// year boundary (New Year, Christmas) still resolve.
pub fn festival_window(target: NaiveDate, window_days: i64) -> FestivalWindow {
    let mut closest: Option<NearbyFestival> = None;
    let mut min_diff = i64::MAX;

    for year in [target.year() - 1, target.year(), target.year() + 1] {
        for entry in calendar_for_year(year) {
            let days_away = (entry.date - target).num_days();
            let diff = days_away.abs();
            if diff <= window_days && diff < min_diff {
                min_diff = diff;
                closest = Some(NearbyFestival {
                    name: entry.name,
                    date: entry.date,
                    days_away,
                });
            }
        }
    }

    FestivalWindow {
        is_festival_nearby: closest.is_some(),
        festival: closest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn calendar_has_all_tracked_festivals() {
        let calendar = calendar_for_year(2024);
        assert_eq!(calendar.len(), 10);
        assert!(calendar
            .iter()
            .any(|e| e.name == "Diwali" && e.date == date(2024, 10, 21)));
    }

    #[test]
    fn finds_upcoming_festival_inside_window() {
        let w = festival_window(date(2024, 10, 19), 3);
        assert!(w.is_festival_nearby);
        let festival = w.festival.expect("festival expected");
        assert_eq!(festival.name, "Diwali");
        assert_eq!(festival.days_away, 2);
    }

    #[test]
    fn reports_passed_festival_with_negative_distance() {
        let w = festival_window(date(2024, 12, 27), 3);
        let festival = w.festival.expect("festival expected");
        assert_eq!(festival.name, "Christmas");
        assert_eq!(festival.days_away, -2);
    }

    #[test]
    fn new_year_window_straddles_year_boundary() {
        let w = festival_window(date(2024, 12, 30), 3);
        let festival = w.festival.expect("festival expected");
        assert_eq!(festival.name, "New Year");
        assert_eq!(festival.date, date(2025, 1, 1));
        assert_eq!(festival.days_away, 2);
    }

    #[test]
    fn quiet_period_finds_nothing() {
        let w = festival_window(date(2024, 6, 15), 3);
        assert!(!w.is_festival_nearby);
        assert!(w.festival.is_none());
    }
}
