use chrono::NaiveDateTime;

use super::{EventStore, EventStoreError, StoreResult};
use crate::models::category::{owning_category, SubcategoryId};
use crate::models::event::{EventId, ProductionEvent};
use crate::utils::date::{days_between, shift_days};

/// What a move actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub day_delta: i64,
    pub recategorized: bool,
}

impl EventStore {
    /// Move an event so it starts on `new_date`'s calendar day.
    ///
    /// The start, end, call and wrap times all shift by the same number of
    /// days and keep their time-of-day, so the duration is preserved. When
    /// `new_subcategory` differs from the event's row the event is
    /// reassigned and its phase follows the owning category.
    pub fn move_event(
        &mut self,
        id: EventId,
        new_date: NaiveDateTime,
        new_subcategory: Option<SubcategoryId>,
    ) -> StoreResult<MoveOutcome> {
        let index = self.index_of(id)?;
        let days = days_between(self.events[index].date, new_date);
        self.apply_move(index, days, new_subcategory)
    }

    /// Move an event by a whole number of days.
    pub fn move_event_by_days(
        &mut self,
        id: EventId,
        days: i64,
        new_subcategory: Option<SubcategoryId>,
    ) -> StoreResult<MoveOutcome> {
        let index = self.index_of(id)?;
        self.apply_move(index, days, new_subcategory)
    }

    fn apply_move(
        &mut self,
        index: usize,
        days: i64,
        new_subcategory: Option<SubcategoryId>,
    ) -> StoreResult<MoveOutcome> {
        let current_subcategory = self.events[index].subcategory_id;
        let reassignment = match new_subcategory {
            Some(sub) if Some(sub) != current_subcategory => {
                let category = owning_category(&self.categories, sub)
                    .ok_or(EventStoreError::UnknownSubcategory(sub))?;
                Some((sub, category.phase))
            }
            _ => None,
        };

        // Every timestamp is shifted up front so an out-of-range move leaves
        // the event and the history untouched
        let event = &self.events[index];
        let shift = |time: NaiveDateTime| {
            shift_days(time, days).ok_or(EventStoreError::DateOutOfRange(event.id, days))
        };
        let date = shift(event.date)?;
        let end_date = event.end_date.map(shift).transpose()?;
        let call_time = event.call_time.map(shift).transpose()?;
        let wrap_time = event.wrap_time.map(shift).transpose()?;

        self.record(format!("Move \"{}\"", self.events[index].title));

        let event = &mut self.events[index];
        event.date = date;
        event.end_date = end_date;
        event.call_time = call_time;
        event.wrap_time = wrap_time;
        if let Some((sub, phase)) = reassignment {
            event.subcategory_id = Some(sub);
            event.phase = phase;
        }

        log::debug!(
            "Moved event {} by {} days{}",
            event.id,
            days,
            if reassignment.is_some() { " into a new row" } else { "" }
        );

        self.commit();
        Ok(MoveOutcome {
            day_delta: days,
            recategorized: reassignment.is_some(),
        })
    }

    /// Change an event's start and/or end.
    ///
    /// Moving the start keeps the current end where it is, so pulling the
    /// start of a single-day event earlier turns it into a span. A start
    /// later than the current end is clamped to the end. An end earlier than
    /// the start clears the end date, collapsing the event to a single day.
    pub fn resize_event(
        &mut self,
        id: EventId,
        new_start: Option<NaiveDateTime>,
        new_end: Option<NaiveDateTime>,
    ) -> StoreResult<()> {
        let index = self.index_of(id)?;
        self.record(format!("Resize \"{}\"", self.events[index].title));

        let event = &mut self.events[index];
        if let Some(start) = new_start {
            let end = event.effective_end();
            event.date = start.min(end);
            event.end_date = if event.end_date.is_some() || event.date < end {
                Some(end)
            } else {
                None
            };
        }
        if let Some(end) = new_end {
            event.end_date = if end < event.date { None } else { Some(end) };
        }

        log::debug!(
            "Resized event {} to {} day(s)",
            event.id,
            event.duration_days()
        );

        self.commit();
        Ok(())
    }

    pub fn add_event(&mut self, event: ProductionEvent) -> StoreResult<EventId> {
        let description = format!("Add \"{}\"", event.title);
        let mut ids = self.insert_batch(vec![event], description)?;
        Ok(ids.remove(0))
    }

    /// Add several events as one undoable change.
    pub fn add_events(
        &mut self,
        events: Vec<ProductionEvent>,
        description: impl Into<String>,
    ) -> StoreResult<Vec<EventId>> {
        if events.is_empty() {
            return Ok(Vec::new());
        }
        self.insert_batch(events, description.into())
    }

    fn insert_batch(
        &mut self,
        events: Vec<ProductionEvent>,
        description: String,
    ) -> StoreResult<Vec<EventId>> {
        for (i, event) in events.iter().enumerate() {
            event.validate().map_err(EventStoreError::InvalidEvent)?;
            let duplicate = self.events.iter().any(|existing| existing.id == event.id)
                || events[..i].iter().any(|earlier| earlier.id == event.id);
            if duplicate {
                return Err(EventStoreError::DuplicateEvent(event.id));
            }
        }

        self.record(description);
        let ids: Vec<EventId> = events.iter().map(|event| event.id).collect();
        self.events.extend(events);
        self.commit();
        Ok(ids)
    }

    /// Replace an event with an edited copy carrying the same id.
    pub fn update_event(&mut self, event: ProductionEvent) -> StoreResult<()> {
        event.validate().map_err(EventStoreError::InvalidEvent)?;
        if let Some(sub) = event.subcategory_id {
            if owning_category(&self.categories, sub).is_none() {
                return Err(EventStoreError::UnknownSubcategory(sub));
            }
        }

        let index = self.index_of(event.id)?;
        self.record(format!("Update \"{}\"", event.title));
        self.events[index] = event;
        self.commit();
        Ok(())
    }

    pub fn remove_event(&mut self, id: EventId) -> StoreResult<ProductionEvent> {
        let index = self.index_of(id)?;
        self.record(format!("Delete \"{}\"", self.events[index].title));
        let removed = self.events.remove(index);
        self.commit();
        Ok(removed)
    }
}
