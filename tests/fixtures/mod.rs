// Test fixtures - reusable test data
// Provides consistent timeline data across integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// First day shown on the test timeline: March 1, 2025
    pub fn timeline_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    /// Day `n` of March 2025 at 07:30 (a typical call)
    pub fn march(n: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, n)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap()
    }

    /// Feb 29, 2024 (leap year) at noon
    pub fn leap_day_2024() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;
    use production_runner::models::event::{EventType, ProductionEvent};

    /// Three-day shoot block on March 10-12 with call and wrap times
    pub fn shoot_block() -> ProductionEvent {
        ProductionEvent::builder()
            .title("Block A")
            .event_type(EventType::ShootDay)
            .date(dates::march(10))
            .end_date(dates::march(12))
            .call_time(dates::march(10))
            .wrap_time(
                NaiveDate::from_ymd_opt(2025, 3, 10)
                    .unwrap()
                    .and_hms_opt(19, 15, 0)
                    .unwrap(),
            )
            .location("Stage 4")
            .build()
            .unwrap()
    }

    /// Single-day location scout on March 3
    pub fn location_scout() -> ProductionEvent {
        ProductionEvent::new("Harbor Scout", EventType::LocationScout, dates::march(3))
    }

    /// Table read milestone on March 7
    pub fn table_read() -> ProductionEvent {
        ProductionEvent::new("Table Read", EventType::Milestone, dates::march(7))
    }
}

/// Sample schedule records for testing
pub mod schedule {
    use super::*;
    use production_runner::models::shoot_day::ShootDay;

    /// Consecutive shoot days starting March 10 with a 06:00 call
    pub fn first_week(days: u32) -> Vec<ShootDay> {
        (0..days)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2025, 3, 10 + i).unwrap();
                let mut day = ShootDay::new(date, i + 1);
                day.call_time = NaiveTime::from_hms_opt(6, 0, 0);
                day.scenes = vec![format!("{}", i * 2 + 1), format!("{}", i * 2 + 2)];
                day
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_fixture_dates_are_valid() {
        assert_eq!(dates::march(10).day(), 10);
        assert_eq!(dates::leap_day_2024().day(), 29);
    }

    #[test]
    fn test_fixture_events_are_valid() {
        assert_eq!(events::shoot_block().duration_days(), 3);
        assert_eq!(schedule::first_week(5).len(), 5);
    }
}
