use chrono::NaiveDate;

use super::EventStore;
use crate::models::category::SubcategoryId;
use crate::models::event::{EventId, EventType, ProductionEvent};

impl EventStore {
    pub fn events(&self) -> &[ProductionEvent] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&ProductionEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Events drawn in a subcategory row, including events that fall back
    /// to it as their phase's first row. Sorted by start.
    pub fn events_in_subcategory(&self, id: SubcategoryId) -> Vec<&ProductionEvent> {
        let mut events: Vec<&ProductionEvent> = self
            .events
            .iter()
            .filter(|event| self.effective_subcategory(event) == Some(id))
            .collect();
        events.sort_by_key(|event| event.date);
        events
    }

    /// Events overlapping the inclusive day range, sorted by start.
    pub fn events_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&ProductionEvent> {
        let mut events: Vec<&ProductionEvent> = self
            .events
            .iter()
            .filter(|event| {
                event.date.date() <= end && event.effective_end().date() >= start
            })
            .collect();
        events.sort_by_key(|event| event.date);
        events
    }

    /// Shoot-day event on a calendar day, if any.
    pub fn shoot_day_on(&self, day: NaiveDate) -> Option<&ProductionEvent> {
        self.events
            .iter()
            .find(|event| event.event_type == EventType::ShootDay && event.date.date() == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::default_categories;
    use chrono::NaiveDateTime;

    fn at(n: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, n)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn span(title: &str, event_type: EventType, start: u32, end: Option<u32>) -> ProductionEvent {
        let mut event = ProductionEvent::new(title, event_type, at(start));
        event.end_date = end.map(at);
        event
    }

    #[test]
    fn test_events_in_range_includes_overlaps() {
        let mut store = EventStore::new("film", default_categories());
        store
            .add_events(
                vec![
                    span("Before", EventType::PrepDay, 1, Some(4)),
                    span("Spanning", EventType::ShootDay, 3, Some(12)),
                    span("Inside", EventType::Meeting, 6, None),
                    span("After", EventType::WrapDay, 11, None),
                ],
                "Seed",
            )
            .unwrap();

        let day = |n| NaiveDate::from_ymd_opt(2025, 3, n).unwrap();
        let titles: Vec<&str> = store
            .events_in_range(day(5), day(10))
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Spanning", "Inside"]);
    }

    #[test]
    fn test_events_in_subcategory_uses_fallback_row() {
        let categories = default_categories();
        let shoot_days = categories[2].subcategories[0].id;
        let rehearsals = categories[2].subcategories[1].id;
        let mut store = EventStore::new("film", categories);

        let mut explicit = span("Rehearsal", EventType::Rehearsal, 2, None);
        explicit.subcategory_id = Some(rehearsals);
        store
            .add_events(
                vec![
                    span("Day 2", EventType::ShootDay, 8, None),
                    span("Day 1", EventType::ShootDay, 7, None),
                    explicit,
                ],
                "Seed",
            )
            .unwrap();

        let titles: Vec<&str> = store
            .events_in_subcategory(shoot_days)
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Day 1", "Day 2"]);
        assert_eq!(store.events_in_subcategory(rehearsals).len(), 1);
    }

    #[test]
    fn test_shoot_day_on() {
        let mut store = EventStore::new("film", default_categories());
        store
            .add_event(span("Meeting", EventType::Meeting, 4, None))
            .unwrap();
        let id = store
            .add_event(span("Day 1", EventType::ShootDay, 4, None))
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(store.shoot_day_on(day).map(|e| e.id), Some(id));
        assert!(store.shoot_day_on(day.succ_opt().unwrap()).is_none());
    }
}
