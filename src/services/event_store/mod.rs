//! Production event store.
//!
//! Owns a project's canonical event list together with its timeline
//! categories and the whole-list undo/redo history. Every mutation is a
//! commit point: when the store was opened with an [`EventStorage`] the full
//! list is written back after the change.

use anyhow::Result;

use crate::models::category::{
    first_subcategory, owning_category, CategoryId, CategoryValidationError, SubcategoryId,
    TimelineCategory,
};
use crate::models::event::{EventId, ProductionEvent};
use crate::models::settings::TimelineSettings;
use crate::services::storage::{self, EventStorage};

pub mod history;
mod mutations;
mod queries;

pub use history::{UndoHistory, DEFAULT_UNDO_LIMIT};
pub use mutations::MoveOutcome;

#[derive(Debug, thiserror::Error)]
pub enum EventStoreError {
    #[error("Event {0} not found")]
    EventNotFound(EventId),
    #[error("Event {0} already exists")]
    DuplicateEvent(EventId),
    #[error("Subcategory {0} does not belong to any category")]
    UnknownSubcategory(SubcategoryId),
    #[error("Category {0} not found")]
    CategoryNotFound(CategoryId),
    #[error("Shifting event {0} by {1} days leaves the supported date range")]
    DateOutOfRange(EventId, i64),
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(#[from] CategoryValidationError),
    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub type StoreResult<T> = std::result::Result<T, EventStoreError>;

pub struct EventStore {
    project_id: String,
    categories: Vec<TimelineCategory>,
    events: Vec<ProductionEvent>,
    history: UndoHistory<Vec<ProductionEvent>>,
    storage: Option<Box<dyn EventStorage>>,
    /// Set when the in-memory list has changes the storage has not accepted
    dirty: bool,
}

impl EventStore {
    /// In-memory store with no persistence.
    pub fn new(project_id: impl Into<String>, categories: Vec<TimelineCategory>) -> Self {
        Self {
            project_id: project_id.into(),
            categories,
            events: Vec::new(),
            history: UndoHistory::new(DEFAULT_UNDO_LIMIT),
            storage: None,
            dirty: false,
        }
    }

    pub fn with_undo_limit(mut self, undo_limit: usize) -> Self {
        self.history = UndoHistory::new(undo_limit);
        self
    }

    /// Seed the store with events without recording history.
    pub fn with_events(mut self, events: Vec<ProductionEvent>) -> Self {
        self.events = events;
        self
    }

    /// Open a project's events from storage.
    ///
    /// Missing or undecodable data yields an empty list; the failure is
    /// logged rather than returned. Use [`EventStore::load_strict`] to
    /// surface it.
    pub fn open(
        project_id: impl Into<String>,
        categories: Vec<TimelineCategory>,
        storage: Box<dyn EventStorage>,
        undo_limit: usize,
    ) -> Self {
        let project_id = project_id.into();
        let events = match storage.load(&project_id) {
            Ok(Some(events)) => events,
            Ok(None) => {
                log::info!("No saved events for project {}, starting empty", project_id);
                Vec::new()
            }
            Err(e) => {
                log::warn!(
                    "Failed to load events for project {}, starting empty: {:#}",
                    project_id,
                    e
                );
                Vec::new()
            }
        };

        Self::assemble(project_id, categories, events, storage, undo_limit)
    }

    /// Open a project's events from storage, returning load errors.
    pub fn load_strict(
        project_id: impl Into<String>,
        categories: Vec<TimelineCategory>,
        storage: Box<dyn EventStorage>,
        undo_limit: usize,
    ) -> StoreResult<Self> {
        let project_id = project_id.into();
        let events = storage.load(&project_id)?.unwrap_or_default();
        Ok(Self::assemble(project_id, categories, events, storage, undo_limit))
    }

    /// Open a project with the backend, data directory and undo limit named
    /// in the settings.
    pub fn open_with_settings(
        project_id: impl Into<String>,
        categories: Vec<TimelineCategory>,
        settings: &TimelineSettings,
    ) -> StoreResult<Self> {
        let storage = storage::from_settings(settings)?;
        Ok(Self::open(project_id, categories, storage, settings.undo_limit))
    }

    fn assemble(
        project_id: String,
        categories: Vec<TimelineCategory>,
        events: Vec<ProductionEvent>,
        storage: Box<dyn EventStorage>,
        undo_limit: usize,
    ) -> Self {
        log::info!(
            "Opened project {} with {} events in {} categories",
            project_id,
            events.len(),
            categories.len()
        );
        Self {
            project_id,
            categories,
            events,
            history: UndoHistory::new(undo_limit),
            storage: Some(storage),
            dirty: false,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the current list to storage, returning any failure.
    pub fn flush(&mut self) -> Result<()> {
        if let Some(storage) = &self.storage {
            storage.save(&self.project_id, &self.events)?;
        }
        self.dirty = false;
        Ok(())
    }

    /// Save after a mutation. Failures are logged and leave the store dirty
    /// so a later `flush` can retry.
    fn commit(&mut self) {
        self.dirty = true;
        let Some(storage) = &self.storage else {
            return;
        };
        match storage.save(&self.project_id, &self.events) {
            Ok(()) => self.dirty = false,
            Err(e) => log::warn!(
                "Failed to save events for project {}: {:#}",
                self.project_id,
                e
            ),
        }
    }

    /// Snapshot the current list before a change.
    fn record(&mut self, description: String) {
        self.history.push(description, self.events.clone());
    }

    fn index_of(&self, id: EventId) -> StoreResult<usize> {
        self.events
            .iter()
            .position(|event| event.id == id)
            .ok_or(EventStoreError::EventNotFound(id))
    }

    // Undo / redo

    /// Restore the list from before the last change.
    pub fn undo(&mut self) -> Option<String> {
        let description = self.history.undo(&mut self.events)?;
        log::debug!("Undo: {}", description);
        self.commit();
        Some(description)
    }

    /// Re-apply the last undone change.
    pub fn redo(&mut self) -> Option<String> {
        let description = self.history.redo(&mut self.events)?;
        log::debug!("Redo: {}", description);
        self.commit();
        Some(description)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.history.redo_description()
    }

    // Categories

    pub fn categories(&self) -> &[TimelineCategory] {
        &self.categories
    }

    /// Replace the category list. Events keep their explicit rows; rows that
    /// no longer exist fall back to their phase's first subcategory.
    pub fn set_categories(&mut self, categories: Vec<TimelineCategory>) -> StoreResult<()> {
        for category in &categories {
            category.validate()?;
        }
        self.categories = categories;
        Ok(())
    }

    /// Flip a category between expanded and collapsed, returning the new state.
    pub fn toggle_category_expanded(&mut self, id: &CategoryId) -> StoreResult<bool> {
        let category = self
            .categories
            .iter_mut()
            .find(|category| &category.id == id)
            .ok_or_else(|| EventStoreError::CategoryNotFound(id.clone()))?;
        category.is_expanded = !category.is_expanded;
        Ok(category.is_expanded)
    }

    /// Row an event is drawn in: its explicit subcategory when that still
    /// exists, otherwise the first subcategory of its phase's category.
    pub fn effective_subcategory(&self, event: &ProductionEvent) -> Option<SubcategoryId> {
        event
            .subcategory_id
            .filter(|id| owning_category(&self.categories, *id).is_some())
            .or_else(|| first_subcategory(&self.categories, event.phase))
    }
}
