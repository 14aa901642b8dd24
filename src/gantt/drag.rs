// Gantt bar drag and resize sessions
//
// A single session tracks the gesture in progress. Pointer movement only
// updates raw offsets here; converting them into days or rows happens when
// the gesture is committed.

use crate::models::category::SubcategoryId;
use crate::models::event::EventId;

/// What the gesture does to the bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    /// Whole bar moves in time and, vertically, between rows
    Move,
    /// Left handle - adjusts the start date
    ResizeStart,
    /// Right handle - adjusts the end date
    ResizeEnd,
}

/// State of the gesture in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub event_id: EventId,
    pub mode: DragMode,
    pub start_x: f32,
    pub current_offset_x: f32,
    pub start_y: f32,
    pub current_y: f32,
    /// Row under the pointer, for highlighting only
    pub hovered_subcategory: Option<SubcategoryId>,
}

impl DragSession {
    pub fn new(event_id: EventId, mode: DragMode, start_x: f32, start_y: f32) -> Self {
        Self {
            event_id,
            mode,
            start_x,
            current_offset_x: 0.0,
            start_y,
            current_y: start_y,
            hovered_subcategory: None,
        }
    }

    pub fn offset_y(&self) -> f32 {
        self.current_y - self.start_y
    }
}

/// True once the pointer has travelled at least `threshold` from the press.
pub fn exceeds_threshold(start: (f32, f32), current: (f32, f32), threshold: f32) -> bool {
    let dx = current.0 - start.0;
    let dy = current.1 - start.1;
    dx.hypot(dy) >= threshold
}

/// Owner of the active drag session.
///
/// Only one gesture is tracked at a time. Beginning a new one while another
/// is open replaces it; the replaced session is handed back so the caller
/// can tell a missed pointer-up happened.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    /// Flips whenever a gesture finishes, so views refresh once per gesture
    /// instead of on every pointer move
    refresh_trigger: bool,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_drag(
        &mut self,
        event_id: EventId,
        mode: DragMode,
        start_x: f32,
        start_y: f32,
    ) -> Option<DragSession> {
        let replaced = self
            .session
            .replace(DragSession::new(event_id, mode, start_x, start_y));
        if let Some(previous) = &replaced {
            log::warn!(
                "Drag on event {} ({:?}) replaced an unfinished drag on event {} ({:?})",
                event_id,
                mode,
                previous.event_id,
                previous.mode
            );
        }
        replaced
    }

    /// Record the pointer position. Returns false when no session is open.
    pub fn update_drag(&mut self, current_x: f32, current_y: f32) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.current_offset_x = current_x - session.start_x;
                session.current_y = current_y;
                true
            }
            None => false,
        }
    }

    pub fn update_hovered_subcategory(&mut self, id: Option<SubcategoryId>) {
        if let Some(session) = self.session.as_mut() {
            session.hovered_subcategory = id;
        }
    }

    /// Close the session and return it.
    pub fn finish(&mut self) -> Option<DragSession> {
        let session = self.session.take()?;
        self.refresh_trigger = !self.refresh_trigger;
        Some(session)
    }

    /// Close the session, returning the final `(x, y)` pointer offsets.
    pub fn end_drag(&mut self) -> (f32, f32) {
        self.finish()
            .map(|session| (session.current_offset_x, session.offset_y()))
            .unwrap_or((0.0, 0.0))
    }

    /// Drop the session without producing a result.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("Cancelled drag on event {}", session.event_id);
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    fn matches(&self, event_id: EventId, mode: DragMode) -> bool {
        self.session
            .as_ref()
            .map_or(false, |s| s.event_id == event_id && s.mode == mode)
    }

    pub fn is_dragging(&self, event_id: EventId) -> bool {
        self.matches(event_id, DragMode::Move)
    }

    pub fn is_resizing_start(&self, event_id: EventId) -> bool {
        self.matches(event_id, DragMode::ResizeStart)
    }

    pub fn is_resizing_end(&self, event_id: EventId) -> bool {
        self.matches(event_id, DragMode::ResizeEnd)
    }

    /// Current horizontal offset for an event and mode, zero unless that
    /// exact gesture is in progress.
    pub fn offset(&self, event_id: EventId, mode: DragMode) -> f32 {
        match &self.session {
            Some(s) if s.event_id == event_id && s.mode == mode => s.current_offset_x,
            _ => 0.0,
        }
    }

    pub fn hovered_subcategory(&self) -> Option<SubcategoryId> {
        self.session.as_ref().and_then(|s| s.hovered_subcategory)
    }

    pub fn refresh_trigger(&self) -> bool {
        self.refresh_trigger
    }
}
