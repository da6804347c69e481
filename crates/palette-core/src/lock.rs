//! Lock engine.
//!
//! Mirrors the selection engine but edits `locked_cells`. Locked cells are
//! immune to paint, fill, paste, move and rotate writes.

use crate::cell_set::CellSet;
use crate::drag::DragCommit;
use crate::state::CoreState;

/// `lock` tool click.
///
/// On an unlocked cell: shift adds it, otherwise it becomes the only lock.
/// On a locked cell: shift unlocks just that cell, otherwise every lock is
/// cleared.
pub fn toggle_lock(state: &mut CoreState, cell: usize, shift: bool) {
    match (state.locked_cells.contains(cell), shift) {
        (true, true) => {
            state.locked_cells.remove(cell);
        }
        (true, false) => state.locked_cells.clear(),
        (false, true) => {
            state.locked_cells.insert(cell);
        }
        (false, false) => state.locked_cells = CellSet::from_iter([cell]),
    }
}

/// Commit a finished box/rope lock drag.
pub fn commit_drag(state: &mut CoreState, commit: DragCommit) {
    if commit.extend {
        state.locked_cells.extend(commit.cells.iter());
    } else {
        state.locked_cells = commit.cells;
    }
}

/// Add every selected cell to the lock set.
pub fn lock_selected(state: &mut CoreState) {
    let selected = state.selected_cells.clone();
    state.locked_cells.extend(selected.iter());
}

/// Remove every selected cell from the lock set.
pub fn unlock_selected(state: &mut CoreState) {
    let selected = &state.selected_cells;
    state.locked_cells.retain(|cell| !selected.contains(cell));
}

/// Lock every cell of the grid.
pub fn lock_all(state: &mut CoreState) {
    state.locked_cells = (0..state.palette.len()).collect();
}

/// Unlock every cell.
pub fn unlock_all(state: &mut CoreState) {
    state.locked_cells.clear();
}
