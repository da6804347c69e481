//! Selection engine.
//!
//! Each function edits the selection fields of a working [`CoreState`] copy
//! (`selected_cell` and `selected_cells`). Callers decide whether the result
//! is committed to history.

use crate::cell_set::CellSet;
use crate::dispatch::Modifiers;
use crate::drag::DragCommit;
use crate::geometry::Line;
use crate::state::CoreState;

/// Generic click select: shift adds `cell`, otherwise it replaces the selection.
pub fn select_cell(state: &mut CoreState, cell: usize, shift: bool) {
    if shift {
        state.selected_cells.insert(cell);
    } else {
        state.selected_cells = CellSet::from_iter([cell]);
    }
    state.selected_cell = Some(cell);
}

/// `select` tool click: clicking the selected cell clears the selection.
pub fn toggle_select(state: &mut CoreState, cell: usize) {
    if state.selected_cell == Some(cell) {
        clear(state);
    } else {
        select_cell(state, cell, false);
    }
}

/// `multiselect` tool click: toggles `cell` in or out of the selection.
pub fn toggle_multi(state: &mut CoreState, cell: usize) {
    if state.selected_cells.remove(cell) {
        state.selected_cell = state.selected_cells.last();
    } else {
        state.selected_cells.insert(cell);
        state.selected_cell = Some(cell);
    }
}

/// Row/column select.
///
/// - shift: union every line from the one holding the last selected cell
///   through `line`
/// - ctrl/meta: remove `line` if it is fully selected, otherwise add it;
///   cells already selected keep their place, so the last selected cell is
///   the last newly added one
/// - plain: replace the selection with `line`
pub fn select_line(state: &mut CoreState, line: Line, modifiers: Modifiers) {
    let dims = state.dimensions();
    let cells = line.cells(dims);

    if modifiers.shift
        && let Some(last) = state.selected_cells.last()
    {
        let from = line.through(last, dims).position();
        let to = line.position();
        for position in from.min(to)..=from.max(to) {
            state.selected_cells.extend(line.with_position(position).cells(dims));
        }
    } else if modifiers.shift {
        state.selected_cells.extend(cells);
    } else if modifiers.command() {
        if state.selected_cells.contains_all(cells.iter().copied()) {
            state.selected_cells.retain(|cell| !cells.contains(&cell));
        } else {
            state.selected_cells.extend(cells);
        }
    } else {
        state.selected_cells = cells.into_iter().collect();
    }
    state.selected_cell = None;
}

/// Commit a finished box/rope selection drag.
pub fn commit_drag(state: &mut CoreState, commit: DragCommit) {
    if commit.extend {
        state.selected_cells.extend(commit.cells.iter());
    } else {
        state.selected_cells = commit.cells;
        state.selected_cell = None;
    }
}

/// Select every cell.
pub fn select_all(state: &mut CoreState) {
    state.selected_cells = (0..state.palette.len()).collect();
    state.selected_cell = None;
}

/// Drop the selection.
pub fn clear(state: &mut CoreState) {
    state.selected_cell = None;
    state.selected_cells.clear();
}
