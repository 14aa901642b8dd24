// Timeline geometry
//
// Converts between timeline days and horizontal points, and bounds
// resize-handle offsets so a bar keeps at least one day.

use chrono::NaiveDate;

use super::drag::DragMode;
use crate::models::event::ProductionEvent;
use crate::utils::date::shift_date;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Day width must be a positive number, got {0}")]
    InvalidDayWidth(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineGeometry {
    timeline_start: NaiveDate,
    day_width: f32,
}

impl TimelineGeometry {
    pub fn new(timeline_start: NaiveDate, day_width: f32) -> Result<Self, GeometryError> {
        if !(day_width.is_finite() && day_width > 0.0) {
            return Err(GeometryError::InvalidDayWidth(day_width));
        }
        Ok(Self {
            timeline_start,
            day_width,
        })
    }

    pub fn timeline_start(&self) -> NaiveDate {
        self.timeline_start
    }

    pub fn day_width(&self) -> f32 {
        self.day_width
    }

    /// Whole days a horizontal offset amounts to, rounded to the nearest day.
    /// A long drag that ends near its origin column yields zero.
    pub fn day_delta(&self, offset_x: f32) -> i64 {
        (offset_x / self.day_width).round() as i64
    }

    /// Horizontal position of a day's column.
    pub fn x_for(&self, day: NaiveDate) -> f32 {
        (day - self.timeline_start).num_days() as f32 * self.day_width
    }

    /// Day whose column contains `x`, or `None` past the representable range.
    pub fn day_at(&self, x: f32) -> Option<NaiveDate> {
        let days = (x / self.day_width).floor() as i64;
        shift_date(self.timeline_start, days)
    }

    pub fn bar_left(&self, event: &ProductionEvent) -> f32 {
        self.x_for(event.date.date())
    }

    pub fn bar_width(&self, event: &ProductionEvent) -> f32 {
        event.duration_days() as f32 * self.day_width
    }

    /// Bound a raw pointer offset for the given drag mode.
    ///
    /// The left handle cannot pull the bar before the timeline start and
    /// neither handle can shrink the bar below one day. Move offsets pass
    /// through unchanged.
    pub fn clamp_resize_offset(&self, event: &ProductionEvent, mode: DragMode, raw: f32) -> f32 {
        let shrink_room = self.bar_width(event) - self.day_width;
        match mode {
            DragMode::Move => raw,
            DragMode::ResizeStart => {
                let earliest = -self.bar_left(event).max(0.0);
                raw.max(earliest).min(shrink_room)
            }
            DragMode::ResizeEnd => raw.max(-shrink_room),
        }
    }
}
