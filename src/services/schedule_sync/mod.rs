//! Shoot-day synchronization.
//!
//! Materializes the shooting schedule's day records as shoot-day events on
//! the production timeline. A calendar day that already has a shoot-day
//! event is left alone, so running the sync repeatedly is harmless.

use std::collections::HashSet;

use crate::models::event::{EventId, EventType, ProductionEvent, ProductionPhase};
use crate::models::shoot_day::ShootDay;
use crate::services::event_store::{EventStore, StoreResult};

/// Build the timeline event for a shoot-day record.
pub fn shoot_day_event(day: &ShootDay) -> ProductionEvent {
    let mut event = ProductionEvent::new(day.title(), EventType::ShootDay, day.start());
    event.phase = ProductionPhase::Production;
    event.scenes = day.scenes.clone();
    event.location = day.location.clone();
    event.call_time = day.call_time.map(|time| day.date.and_time(time));
    event.notes = day.notes.clone();
    event.shoot_day_number = Some(day.day_number);
    event
}

/// Add an event for every shoot day that has none yet.
/// Returns the ids of the events created.
pub fn sync_shoot_days(store: &mut EventStore, days: &[ShootDay]) -> StoreResult<Vec<EventId>> {
    let mut covered = HashSet::new();
    let mut new_events = Vec::new();

    for day in days {
        if store.shoot_day_on(day.date).is_some() || !covered.insert(day.date) {
            log::debug!("Shoot day {} on {} already on timeline", day.day_number, day.date);
            continue;
        }
        new_events.push(shoot_day_event(day));
    }

    if new_events.is_empty() {
        return Ok(Vec::new());
    }

    let count = new_events.len();
    let ids = store.add_events(new_events, format!("Sync {} shoot days", count))?;
    log::info!(
        "Synced {} new shoot days into project {}",
        count,
        store.project_id()
    );
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::default_categories;
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn shoot_day(day: u32, number: u32) -> ShootDay {
        let mut record = ShootDay::new(NaiveDate::from_ymd_opt(2025, 6, day).unwrap(), number);
        record.scenes = vec![format!("{}", number * 10)];
        record.location = Some("Stage 4".to_string());
        record.call_time = NaiveTime::from_hms_opt(6, 0, 0);
        record
    }

    #[test]
    fn test_shoot_day_event_fields() {
        let record = shoot_day(2, 1);
        let event = shoot_day_event(&record);

        assert_eq!(event.title, "Shoot Day 1");
        assert_eq!(event.event_type, EventType::ShootDay);
        assert_eq!(event.phase, ProductionPhase::Production);
        assert_eq!(event.scenes, vec!["10".to_string()]);
        assert_eq!(event.location.as_deref(), Some("Stage 4"));
        assert_eq!(event.call_time, Some(record.start()));
        assert_eq!(event.shoot_day_number, Some(1));
        assert_eq!(event.end_date, None);
    }

    #[test]
    fn test_sync_adds_missing_days_once() {
        let mut store = EventStore::new("film", default_categories());
        let schedule = vec![shoot_day(2, 1), shoot_day(3, 2)];

        let first = sync_shoot_days(&mut store, &schedule).unwrap();
        assert_eq!(first.len(), 2);

        let second = sync_shoot_days(&mut store, &schedule).unwrap();
        assert!(second.is_empty());
        assert_eq!(store.events().len(), 2);
    }

    #[test]
    fn test_sync_matches_by_calendar_day() {
        let mut store = EventStore::new("film", default_categories());
        let existing_time = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        store
            .add_event(ProductionEvent::new("Pickups", EventType::ShootDay, existing_time))
            .unwrap();

        let ids = sync_shoot_days(&mut store, &[shoot_day(2, 1), shoot_day(4, 2)]).unwrap();
        assert_eq!(ids.len(), 1);
        assert_eq!(store.get(ids[0]).unwrap().title, "Shoot Day 2");
    }

    #[test]
    fn test_sync_ignores_other_event_types_on_same_day() {
        let mut store = EventStore::new("film", default_categories());
        store
            .add_event(ProductionEvent::new(
                "Production Meeting",
                EventType::Meeting,
                shoot_day(2, 1).start(),
            ))
            .unwrap();

        let ids = sync_shoot_days(&mut store, &[shoot_day(2, 1)]).unwrap();
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn test_sync_deduplicates_within_batch_and_undoes_as_one_step() {
        let mut store = EventStore::new("film", default_categories());
        let ids = sync_shoot_days(&mut store, &[shoot_day(2, 1), shoot_day(2, 1)]).unwrap();
        assert_eq!(ids.len(), 1);

        assert_eq!(store.undo(), Some("Sync 1 shoot days".to_string()));
        assert!(store.events().is_empty());
    }
}
