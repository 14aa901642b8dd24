// Undo/Redo history
//
// Whole-state snapshots with a description per entry, capped at a
// fixed number of undo steps.

/// Default number of undo steps kept.
pub const DEFAULT_UNDO_LIMIT: usize = 20;

#[derive(Debug, Clone)]
struct HistoryEntry<T> {
    description: String,
    snapshot: T,
}

/// Manager for undo/redo stacks of state snapshots
#[derive(Debug, Clone)]
pub struct UndoHistory<T> {
    /// Snapshots taken before each change, most recent last
    undo_stack: Vec<HistoryEntry<T>>,
    /// Snapshots taken before each undo, most recent last
    redo_stack: Vec<HistoryEntry<T>>,
    /// Maximum number of snapshots to keep in undo history
    max_history: usize,
}

impl<T> Default for UndoHistory<T> {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl<T> UndoHistory<T> {
    pub fn new(max_history: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history: max_history.max(1),
        }
    }

    /// Record the state before a change
    pub fn push(&mut self, description: impl Into<String>, snapshot: T) {
        // A new change invalidates everything that could be redone
        self.redo_stack.clear();

        self.undo_stack.push(HistoryEntry {
            description: description.into(),
            snapshot,
        });

        if self.undo_stack.len() > self.max_history {
            let excess = self.undo_stack.len() - self.max_history;
            self.undo_stack.drain(..excess);
        }
    }

    /// Swap `current` with the most recent undo snapshot.
    /// Returns the description of the undone change.
    pub fn undo(&mut self, current: &mut T) -> Option<String> {
        let entry = self.undo_stack.pop()?;
        let replaced = std::mem::replace(current, entry.snapshot);
        self.redo_stack.push(HistoryEntry {
            description: entry.description.clone(),
            snapshot: replaced,
        });
        Some(entry.description)
    }

    /// Swap `current` with the most recent redo snapshot.
    /// Returns the description of the redone change.
    pub fn redo(&mut self, current: &mut T) -> Option<String> {
        let entry = self.redo_stack.pop()?;
        let replaced = std::mem::replace(current, entry.snapshot);
        self.undo_stack.push(HistoryEntry {
            description: entry.description.clone(),
            snapshot: replaced,
        });
        Some(entry.description)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Description of the next change to undo (for menu display)
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|entry| entry.description.as_str())
    }

    /// Description of the next change to redo (for menu display)
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|entry| entry.description.as_str())
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
