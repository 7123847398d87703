//! Undo/redo stacks of whole-schema snapshots.

use serde::{Deserialize, Serialize};

use crate::CardLayoutSchema;

/// Past and future snapshots of a live schema.
///
/// Snapshots are owned deep copies; nothing is shared with the live schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    /// Snapshots before the current state, oldest first.
    pub past: Vec<CardLayoutSchema>,
    /// Snapshots undone from, most recently undone last.
    pub future: Vec<CardLayoutSchema>,
}

impl HistoryState {
    /// Create empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state before a mutation and drop the redo stack.
    pub fn record(&mut self, snapshot: CardLayoutSchema) {
        self.past.push(snapshot);
        self.future.clear();
    }

    /// Step back: returns the previous snapshot and stores `current` for redo.
    ///
    /// Returns `None` (and keeps `current` out of the stacks) when there is
    /// nothing to undo.
    pub fn undo(&mut self, current: &CardLayoutSchema) -> Option<CardLayoutSchema> {
        let previous = self.past.pop()?;
        self.future.push(current.clone());
        Some(previous)
    }

    /// Step forward: returns the next snapshot and stores `current` for undo.
    pub fn redo(&mut self, current: &CardLayoutSchema) -> Option<CardLayoutSchema> {
        let next = self.future.pop()?;
        self.past.push(current.clone());
        Some(next)
    }

    /// Whether an undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether a redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Drop all snapshots.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(width: f64) -> CardLayoutSchema {
        CardLayoutSchema::new("h", width, 100.0)
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut history = HistoryState::new();
        history.record(schema(1.0));
        let current = schema(2.0);

        let previous = history.undo(&current).expect("undo");
        assert_eq!(previous, schema(1.0));
        assert!(!history.can_undo());
        assert!(history.can_redo());

        let next = history.redo(&previous).expect("redo");
        assert_eq!(next, schema(2.0));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = HistoryState::new();
        assert!(history.undo(&schema(1.0)).is_none());
        assert!(history.redo(&schema(1.0)).is_none());
        assert_eq!(history, HistoryState::default());
    }

    #[test]
    fn test_record_clears_future() {
        let mut history = HistoryState::new();
        history.record(schema(1.0));
        let _ = history.undo(&schema(2.0));
        assert!(history.can_redo());
        history.record(schema(3.0));
        assert!(!history.can_redo());
        assert_eq!(history.past.len(), 1);
    }
}
