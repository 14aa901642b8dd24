// Event module
// Production event model placed on the Gantt timeline

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::category::{is_valid_hex_color, CategoryId, SubcategoryId};
use crate::utils::date::days_between;

/// Opaque unique identifier of a production event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Production lifecycle stage. Each phase maps to one timeline category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductionPhase {
    Development,
    PreProduction,
    Production,
    PostProduction,
}

impl ProductionPhase {
    pub const ALL: [ProductionPhase; 4] = [
        ProductionPhase::Development,
        ProductionPhase::PreProduction,
        ProductionPhase::Production,
        ProductionPhase::PostProduction,
    ];

    /// Stable slug, also used as the id of the phase's default category.
    pub fn slug(&self) -> &'static str {
        match self {
            ProductionPhase::Development => "development",
            ProductionPhase::PreProduction => "pre-production",
            ProductionPhase::Production => "production",
            ProductionPhase::PostProduction => "post-production",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductionPhase::Development => "Development",
            ProductionPhase::PreProduction => "Pre-Production",
            ProductionPhase::Production => "Production",
            ProductionPhase::PostProduction => "Post-Production",
        }
    }
}

/// Kind of production event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    ShootDay,
    PrepDay,
    Rehearsal,
    LocationScout,
    Meeting,
    Milestone,
    WrapDay,
    PreProduction,
    PostProduction,
}

impl EventType {
    pub fn display_name(&self) -> &'static str {
        match self {
            EventType::ShootDay => "Shoot Day",
            EventType::PrepDay => "Prep Day",
            EventType::Rehearsal => "Rehearsal",
            EventType::LocationScout => "Location Scout",
            EventType::Meeting => "Meeting",
            EventType::Milestone => "Milestone",
            EventType::WrapDay => "Wrap Day",
            EventType::PreProduction => "Pre-Production",
            EventType::PostProduction => "Post-Production",
        }
    }

    /// Phase a new event of this type is bucketed into.
    pub fn default_phase(&self) -> ProductionPhase {
        match self {
            EventType::ShootDay
            | EventType::Rehearsal
            | EventType::WrapDay
            | EventType::Milestone => ProductionPhase::Production,
            EventType::PrepDay
            | EventType::LocationScout
            | EventType::Meeting
            | EventType::PreProduction => ProductionPhase::PreProduction,
            EventType::PostProduction => ProductionPhase::PostProduction,
        }
    }
}

/// A dated production event shown as a bar on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionEvent {
    pub id: EventId,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub phase: ProductionPhase,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub subcategory_id: Option<SubcategoryId>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub scenes: Vec<String>,
    #[serde(default)]
    pub crew: Vec<String>,
    #[serde(default)]
    pub call_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub wrap_time: Option<NaiveDateTime>,
    /// Hex color override; the category color is used otherwise
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub linked_location_id: Option<Uuid>,
    #[serde(default)]
    pub linked_task_ids: Vec<Uuid>,
    /// Day number for events synthesized from the shooting schedule
    #[serde(default)]
    pub shoot_day_number: Option<u32>,
}

impl ProductionEvent {
    /// Create a single-day event bucketed by the type's default phase.
    ///
    /// # Examples
    /// ```
    /// use production_runner::models::event::{EventType, ProductionEvent, ProductionPhase};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap().and_hms_opt(7, 0, 0).unwrap();
    /// let event = ProductionEvent::new("Table Read", EventType::Rehearsal, date);
    /// assert_eq!(event.phase, ProductionPhase::Production);
    /// assert_eq!(event.duration_days(), 1);
    /// ```
    pub fn new(title: impl Into<String>, event_type: EventType, date: NaiveDateTime) -> Self {
        Self {
            id: EventId::new_v4(),
            title: title.into(),
            event_type,
            phase: event_type.default_phase(),
            date,
            end_date: None,
            subcategory_id: None,
            notes: None,
            location: None,
            scenes: Vec::new(),
            crew: Vec::new(),
            call_time: None,
            wrap_time: None,
            color: None,
            linked_location_id: None,
            linked_task_ids: Vec::new(),
            shoot_day_number: None,
        }
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> ProductionEventBuilder {
        ProductionEventBuilder::new()
    }

    /// Category bucket derived from the phase.
    pub fn category_id(&self) -> CategoryId {
        CategoryId::for_phase(self.phase)
    }

    /// Last day covered by the event. An end before the start is treated
    /// as a single-day event.
    pub fn effective_end(&self) -> NaiveDateTime {
        match self.end_date {
            Some(end) if end >= self.date => end,
            _ => self.date,
        }
    }

    /// Number of calendar days covered, inclusive, never less than one.
    pub fn duration_days(&self) -> i64 {
        (days_between(self.date, self.effective_end()) + 1).max(1)
    }

    pub fn is_multi_day(&self) -> bool {
        self.duration_days() > 1
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        if let Some(ref color) = self.color {
            if !is_valid_hex_color(color) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct ProductionEventBuilder {
    title: Option<String>,
    event_type: Option<EventType>,
    phase: Option<ProductionPhase>,
    date: Option<NaiveDateTime>,
    end_date: Option<NaiveDateTime>,
    subcategory_id: Option<SubcategoryId>,
    notes: Option<String>,
    location: Option<String>,
    scenes: Vec<String>,
    crew: Vec<String>,
    call_time: Option<NaiveDateTime>,
    wrap_time: Option<NaiveDateTime>,
    color: Option<String>,
    linked_location_id: Option<Uuid>,
    linked_task_ids: Vec<Uuid>,
}

impl ProductionEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn event_type(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    /// Override the phase (defaults to the event type's phase)
    pub fn phase(mut self, phase: ProductionPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn end_date(mut self, end_date: NaiveDateTime) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn subcategory(mut self, id: SubcategoryId) -> Self {
        self.subcategory_id = Some(id);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn scene(mut self, scene: impl Into<String>) -> Self {
        self.scenes.push(scene.into());
        self
    }

    pub fn crew_member(mut self, name: impl Into<String>) -> Self {
        self.crew.push(name.into());
        self
    }

    pub fn call_time(mut self, call_time: NaiveDateTime) -> Self {
        self.call_time = Some(call_time);
        self
    }

    pub fn wrap_time(mut self, wrap_time: NaiveDateTime) -> Self {
        self.wrap_time = Some(wrap_time);
        self
    }

    /// Set the color override (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn linked_location(mut self, id: Uuid) -> Self {
        self.linked_location_id = Some(id);
        self
    }

    pub fn linked_task(mut self, id: Uuid) -> Self {
        self.linked_task_ids.push(id);
        self
    }

    /// Build the event
    pub fn build(self) -> Result<ProductionEvent, String> {
        let title = self.title.ok_or("Event title is required")?;
        let event_type = self.event_type.ok_or("Event type is required")?;
        let date = self.date.ok_or("Event date is required")?;

        let event = ProductionEvent {
            id: EventId::new_v4(),
            title,
            event_type,
            phase: self.phase.unwrap_or_else(|| event_type.default_phase()),
            date,
            end_date: self.end_date,
            subcategory_id: self.subcategory_id,
            notes: self.notes,
            location: self.location,
            scenes: self.scenes,
            crew: self.crew,
            call_time: self.call_time,
            wrap_time: self.wrap_time,
            color: self.color,
            linked_location_id: self.linked_location_id,
            linked_task_ids: self.linked_task_ids,
            shoot_day_number: None,
        };

        event.validate()?;
        Ok(event)
    }
}
