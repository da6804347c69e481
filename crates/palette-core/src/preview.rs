//! Speculative palettes shown while hovering or with a rotate tool active.
//!
//! Previews are computed from the committed state and never written back.
//! Each function returns `None` when there is nothing to preview.

use crate::color::Color;
use crate::geometry::Line;
use crate::palette::{Palette, RotateDirection};
use crate::state::CoreState;
use crate::tool::Tool;

/// Palette after pasting the cell clipboard at `target`.
pub fn paste(state: &CoreState, target: usize) -> Option<Palette> {
    let clipboard = state.copied_cells.as_ref()?;
    state.dimensions().contains(target).then(|| {
        clipboard.paste(target, &state.palette, &state.locked_cells)
    })
}

/// Palette after pasting the copied row/column onto `target`.
pub fn paste_line(state: &CoreState, target: Line) -> Option<Palette> {
    if target.check(state.dimensions()).is_err() {
        return None;
    }
    let mut pasted = match (state.copied_line?, target) {
        (Line::Row(source), Line::Row(row)) if source != row => {
            state.palette.paste_row(source, row)
        }
        (Line::Column(source), Line::Column(column)) if source != column => {
            state.palette.paste_column(source, column)
        }
        _ => return None,
    };
    pasted.restore_locked(&state.palette, &state.locked_cells);
    Some(pasted)
}

/// Palette after moving the selection onto `target` with the `move` tool.
pub fn move_to(state: &CoreState, target: usize, background: Color) -> Option<Palette> {
    if state.selected_tool != Some(Tool::Move) || !state.dimensions().contains(target) {
        return None;
    }
    let (rows, columns) = state.palette.move_offset(&state.selected_cells, target)?;
    Some(state.palette.move_cells(
        &state.selected_cells,
        rows,
        columns,
        &state.locked_cells,
        background,
    ))
}

/// Palette after applying the active rotate tool to the selection.
pub fn rotation(state: &CoreState, background: Color) -> Option<Palette> {
    let direction = match state.selected_tool? {
        Tool::RotateLeft90 => RotateDirection::Left,
        Tool::RotateRight90 => RotateDirection::Right,
        _ => return None,
    };
    if state.selected_cells.is_empty() {
        return None;
    }
    Some(state.palette.rotate90(
        &state.selected_cells,
        direction,
        &state.locked_cells,
        background,
    ))
}
