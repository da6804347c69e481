//! Linear undo/redo over whole-state snapshots.
//!
//! [`History`] keeps the present value plus two stacks. A push moves the
//! present onto the undo stack and clears the redo stack; undo and redo move
//! values between the stacks. The undo stack is bounded and drops its oldest
//! entry once full.

use tracing::trace;

/// Default maximum undo depth.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Undo/redo store generic over the snapshot type.
#[derive(Debug, Clone)]
pub struct History<S> {
    past: Vec<S>,
    present: S,
    /// Top of the stack (last element) is the next redo.
    future: Vec<S>,
    max_depth: usize,
}

impl<S: Clone> History<S> {
    /// Start a history at `initial` with the default depth.
    pub fn new(initial: S) -> Self {
        Self::with_depth(initial, DEFAULT_MAX_DEPTH)
    }

    /// Start a history at `initial` keeping at most `max_depth` undo steps (minimum 1).
    pub fn with_depth(initial: S, max_depth: usize) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Current value.
    pub fn present(&self) -> &S {
        &self.present
    }

    /// Make `state` current. The previous value becomes undoable; redo is lost.
    pub fn push(&mut self, state: S) {
        let previous = std::mem::replace(&mut self.present, state);
        self.past.push(previous);
        if self.past.len() > self.max_depth {
            self.past.remove(0);
        }
        self.future.clear();
        trace!(undo_depth = self.past.len(), "history push");
    }

    /// Step back. Returns `false` (and does nothing) when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        trace!(
            undo_depth = self.past.len(),
            redo_depth = self.future.len(),
            "history undo"
        );
        true
    }

    /// Step forward. Returns `false` (and does nothing) when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        trace!(
            undo_depth = self.past.len(),
            redo_depth = self.future.len(),
            "history redo"
        );
        true
    }

    /// Whether [`undo`](Self::undo) would do something.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether [`redo`](Self::redo) would do something.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undoable steps.
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of redoable steps.
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Maximum undo depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drop both stacks, keeping the present value.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_undo_redo_linearity() {
        let mut history = History::new(0);
        history.push(1);
        history.push(2);
        assert!(history.undo());
        assert_eq!(*history.present(), 1);
        assert!(history.redo());
        assert_eq!(*history.present(), 2);
    }

    #[test]
    fn test_push_after_undo_discards_redo() {
        let mut history = History::new("a");
        history.push("b");
        history.undo();
        assert!(history.can_redo());
        history.push("c");
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(*history.present(), "c");
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut history = History::new(7);
        assert!(!history.can_undo());
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(*history.present(), 7);
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut history = History::with_depth(0, 3);
        for i in 1..=5 {
            history.push(i);
        }
        assert_eq!(history.undo_depth(), 3);
        while history.undo() {}
        // 0 and 1 fell off the bottom.
        assert_eq!(*history.present(), 2);
    }

    #[test]
    fn test_clear_keeps_present() {
        let mut history = History::new(0);
        history.push(1);
        history.push(2);
        history.undo();
        history.clear();
        assert_eq!(*history.present(), 1);
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 0);
    }
}
