// Gantt pointer interaction
//
// Ties a press on a bar, the drag session, the row layout and the event
// store together: pointer-down records the press, pointer-moves past the
// drag threshold open a session, pointer-up converts the final offsets into
// a day/row change and commits it.

use chrono::NaiveDate;

use super::drag::{exceeds_threshold, DragController, DragMode, DragSession};
use super::geometry::{GeometryError, TimelineGeometry};
use super::layout::{LayoutMetrics, SubcategoryLayout};
use crate::models::category::{CategoryId, TimelineCategory};
use crate::models::event::EventId;
use crate::models::settings::TimelineSettings;
use crate::services::event_store::{EventStore, EventStoreError, MoveOutcome, StoreResult};
use crate::utils::date::shift_days;

/// A press on a bar that has not yet moved far enough to be a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingPress {
    event_id: EventId,
    mode: DragMode,
    x: f32,
    y: f32,
}

/// Change written to the store when a gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragCommit {
    Moved {
        event_id: EventId,
        outcome: MoveOutcome,
    },
    Resized {
        event_id: EventId,
        mode: DragMode,
        day_delta: i64,
    },
}

pub struct GanttInteraction {
    store: EventStore,
    drag: DragController,
    layout: SubcategoryLayout,
    geometry: TimelineGeometry,
    metrics: LayoutMetrics,
    drag_threshold: f32,
    pending: Option<PendingPress>,
}

impl GanttInteraction {
    pub fn new(
        store: EventStore,
        settings: &TimelineSettings,
        timeline_start: NaiveDate,
    ) -> Result<Self, GeometryError> {
        let geometry = TimelineGeometry::new(timeline_start, settings.day_width)?;
        let metrics = LayoutMetrics::from(settings);
        let layout = SubcategoryLayout::build(store.categories(), metrics);

        Ok(Self {
            store,
            drag: DragController::new(),
            layout,
            geometry,
            metrics,
            drag_threshold: settings.drag_threshold,
            pending: None,
        })
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Mutable access to the store. Call [`GanttInteraction::refresh_layout`]
    /// after changing categories through it.
    pub fn store_mut(&mut self) -> &mut EventStore {
        &mut self.store
    }

    pub fn into_store(self) -> EventStore {
        self.store
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn layout(&self) -> &SubcategoryLayout {
        &self.layout
    }

    pub fn geometry(&self) -> &TimelineGeometry {
        &self.geometry
    }

    // Layout upkeep

    pub fn refresh_layout(&mut self) {
        self.layout.rebuild(self.store.categories(), self.metrics);
    }

    pub fn set_layout_origin(&mut self, origin_y: f32) {
        self.layout.set_origin(origin_y);
    }

    pub fn toggle_category(&mut self, id: &CategoryId) -> StoreResult<bool> {
        let expanded = self.store.toggle_category_expanded(id)?;
        self.refresh_layout();
        Ok(expanded)
    }

    pub fn set_categories(&mut self, categories: Vec<TimelineCategory>) -> StoreResult<()> {
        self.store.set_categories(categories)?;
        self.refresh_layout();
        Ok(())
    }

    // Pointer handling

    /// Press on a bar or one of its handles. Returns false for unknown events.
    pub fn pointer_down(&mut self, event_id: EventId, mode: DragMode, x: f32, y: f32) -> bool {
        if self.store.get(event_id).is_none() {
            log::debug!("Ignoring press on unknown event {}", event_id);
            return false;
        }
        self.pending = Some(PendingPress {
            event_id,
            mode,
            x,
            y,
        });
        true
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if !self.drag.is_active() {
            let Some(press) = self.pending else {
                return;
            };
            if !exceeds_threshold((press.x, press.y), (x, y), self.drag_threshold) {
                return;
            }
            self.pending = None;
            self.drag.begin_drag(press.event_id, press.mode, press.x, press.y);
        }

        self.track(x, y);
    }

    fn track(&mut self, x: f32, y: f32) {
        self.drag.update_drag(x, y);
        if self.drag.session().map(|s| s.mode) == Some(DragMode::Move) {
            self.drag
                .update_hovered_subcategory(self.layout.subcategory_at(y));
        }
    }

    /// Finish the gesture and commit it.
    ///
    /// Returns `Ok(None)` for a plain click, or when the gesture rounds back
    /// to the original day and row.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> StoreResult<Option<DragCommit>> {
        self.pending = None;
        if !self.drag.is_active() {
            return Ok(None);
        }

        self.track(x, y);
        match self.drag.finish() {
            Some(session) => self.commit(session),
            None => Ok(None),
        }
    }

    /// Abandon the gesture without touching the store.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.drag.cancel();
    }

    fn commit(&mut self, session: DragSession) -> StoreResult<Option<DragCommit>> {
        let event = self
            .store
            .get(session.event_id)
            .ok_or(EventStoreError::EventNotFound(session.event_id))?;
        let offset = self
            .geometry
            .clamp_resize_offset(event, session.mode, session.current_offset_x);
        let days = self.geometry.day_delta(offset);

        match session.mode {
            DragMode::Move => {
                let current_row = self.store.effective_subcategory(event);
                let new_row = session
                    .hovered_subcategory
                    .filter(|row| Some(*row) != current_row);
                if days == 0 && new_row.is_none() {
                    return Ok(None);
                }

                let outcome = self
                    .store
                    .move_event_by_days(session.event_id, days, new_row)?;
                Ok(Some(DragCommit::Moved {
                    event_id: session.event_id,
                    outcome,
                }))
            }
            DragMode::ResizeStart | DragMode::ResizeEnd => {
                if days == 0 {
                    return Ok(None);
                }

                let edge = if session.mode == DragMode::ResizeStart {
                    event.date
                } else {
                    event.effective_end()
                };
                let moved = shift_days(edge, days)
                    .ok_or(EventStoreError::DateOutOfRange(session.event_id, days))?;
                let (new_start, new_end) = if session.mode == DragMode::ResizeStart {
                    (Some(moved), None)
                } else {
                    (None, Some(moved))
                };
                self.store
                    .resize_event(session.event_id, new_start, new_end)?;
                Ok(Some(DragCommit::Resized {
                    event_id: session.event_id,
                    mode: session.mode,
                    day_delta: days,
                }))
            }
        }
    }

    /// Horizontal offset to draw an event's bar (or handle) with while a
    /// gesture is in progress, bounded the same way the commit will be.
    pub fn preview_offset(&self, event_id: EventId, mode: DragMode) -> f32 {
        let raw = self.drag.offset(event_id, mode);
        match self.store.get(event_id) {
            Some(event) if raw != 0.0 => self.geometry.clamp_resize_offset(event, mode, raw),
            _ => raw,
        }
    }
}
