//! Command Interface Layer
//!
//! Every change to [`CoreState`] is expressed as a [`Command`] and applied by
//! [`reduce`], a pure `(state, command) -> state` function. The pointer and
//! keyboard dispatcher produces commands; frontends can also send them
//! directly for toolbar, header and action-bar intents.
//!
//! # Overview
//!
//! - [`GridCommand`]: shape changes and row/column operations
//! - [`PaintCommand`]: palette writes (paint, fill, paste, move, rotate)
//! - [`SelectionCommand`]: selection and cell clipboard
//! - [`LockCommand`]: lock set changes
//! - [`ToolCommand`]: tool and paint color
//!
//! Index arguments are validated up front; an out-of-range index fails the
//! whole command with a [`CommandError`] and nothing is applied.
//!
//! # Example
//!
//! ```rust
//! use palette_core::{Color, Command, CoreState, EditorConfig, PaintCommand, reduce};
//!
//! let config = EditorConfig::default();
//! let state = CoreState::from_config(&config);
//!
//! let paint = Command::Paint(PaintCommand::PaintCell { cell: 0 });
//! let next = reduce(&state, &paint, &config).unwrap();
//! assert_eq!(next.palette.get(0), Some(Color::BLACK));
//! assert_eq!(state.palette.get(0), Some(Color::WHITE));
//! ```

use crate::cell_set::CellSet;
use crate::clipboard::CellClipboard;
use crate::color::Color;
use crate::config::EditorConfig;
use crate::dispatch::Modifiers;
use crate::drag::DragCommit;
use crate::error::CommandError;
use crate::geometry::{Dimensions, GridLayout, Line, PopEdge};
use crate::lock;
use crate::palette::{Palette, RotateDirection};
use crate::selection;
use crate::state::CoreState;
use crate::tool::Tool;
use tracing::debug;

/// Grid shape and row/column commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCommand {
    /// Position-preserving resize.
    Resize {
        /// New width.
        width: usize,
        /// New height.
        height: usize,
    },
    /// Drop the row or column on an edge.
    PopSection(PopEdge),
    /// Delete a row or column, compacting the rest.
    RemoveLine(Line),
    /// Set every unlocked cell of a row or column to the background.
    ClearLine(Line),
    /// Remember a row or column for a later [`PasteLine`](GridCommand::PasteLine).
    CopyLine(Line),
    /// Paste the copied row/column onto `Line`, then forget the copy.
    PasteLine(Line),
    /// Reflow every cell into a new layout.
    TransformLayout(GridLayout),
    /// Replace dimensions and palette together (preset load).
    LoadPalette(Palette),
}

/// Palette writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintCommand {
    /// Paint one cell with the selected color.
    PaintCell {
        /// Target cell.
        cell: usize,
    },
    /// Set one cell to an explicit color.
    SetCellColor {
        /// Target cell.
        cell: usize,
        /// New color.
        color: Color,
    },
    /// Fill every unlocked cell with the selected color.
    FillAll,
    /// Fill every selected unlocked cell with the selected color.
    FillSelected,
    /// Fill a row or column with the selected color.
    FillLine(Line),
    /// Set every selected unlocked cell to an explicit color.
    SetSelectedColor(Color),
    /// Set every selected unlocked cell to the background.
    ClearSelected,
    /// Paste the cell clipboard anchored at `target`, then clear the clipboard.
    PasteCells {
        /// Cell receiving the clipboard's first cell.
        target: usize,
    },
    /// Move the selection so its first cell lands on `target`.
    MoveSelection {
        /// Destination of the first selected cell.
        target: usize,
    },
    /// Move the selection by an offset.
    MoveSelectionBy {
        /// Rows to move (negative is up).
        rows: isize,
        /// Columns to move (negative is left).
        columns: isize,
    },
    /// Rotate the selection a quarter turn.
    RotateSelection(RotateDirection),
}

/// Selection and cell clipboard commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionCommand {
    /// Generic click: replace, or add with shift.
    Click {
        /// Clicked cell.
        cell: usize,
        /// Shift held.
        shift: bool,
    },
    /// `select` tool click.
    Toggle {
        /// Clicked cell.
        cell: usize,
    },
    /// `multiselect` tool click.
    ToggleMulti {
        /// Clicked cell.
        cell: usize,
    },
    /// Row/column select with modifier semantics.
    SelectLine {
        /// Clicked row or column.
        line: Line,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// Commit a box/rope selection.
    SelectCells {
        /// Cells covered.
        cells: CellSet,
        /// Union with the current selection instead of replacing it.
        extend: bool,
    },
    /// Select every cell.
    SelectAll,
    /// Drop the selection.
    Clear,
    /// Copy the unlocked selected cells to the cell clipboard.
    Copy,
    /// Forget the cell clipboard.
    CancelClipboard,
}

/// Lock set commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockCommand {
    /// `lock` tool click.
    Toggle {
        /// Clicked cell.
        cell: usize,
        /// Shift held.
        shift: bool,
    },
    /// Commit a box/rope lock.
    LockCells {
        /// Cells covered.
        cells: CellSet,
        /// Union with the current locks instead of replacing them.
        extend: bool,
    },
    /// Lock every selected cell.
    LockSelected,
    /// Unlock every selected cell.
    UnlockSelected,
    /// Lock every cell.
    LockAll,
    /// Unlock every cell.
    UnlockAll,
}

/// Tool and color commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCommand {
    /// Choose a tool. Immediate tools act once and leave the current tool in place.
    Select(Tool),
    /// Deselect the current tool.
    Deselect,
    /// Change the paint color.
    SetColor(Color),
}

/// Editor command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Grid shape and row/column commands.
    Grid(GridCommand),
    /// Palette writes.
    Paint(PaintCommand),
    /// Selection and cell clipboard commands.
    Selection(SelectionCommand),
    /// Lock set commands.
    Lock(LockCommand),
    /// Tool and color commands.
    Tool(ToolCommand),
}

impl From<GridCommand> for Command {
    fn from(command: GridCommand) -> Self {
        Command::Grid(command)
    }
}

impl From<PaintCommand> for Command {
    fn from(command: PaintCommand) -> Self {
        Command::Paint(command)
    }
}

impl From<SelectionCommand> for Command {
    fn from(command: SelectionCommand) -> Self {
        Command::Selection(command)
    }
}

impl From<LockCommand> for Command {
    fn from(command: LockCommand) -> Self {
        Command::Lock(command)
    }
}

impl From<ToolCommand> for Command {
    fn from(command: ToolCommand) -> Self {
        Command::Tool(command)
    }
}

impl From<DragCommit> for SelectionCommand {
    fn from(commit: DragCommit) -> Self {
        SelectionCommand::SelectCells {
            cells: commit.cells,
            extend: commit.extend,
        }
    }
}

impl From<DragCommit> for LockCommand {
    fn from(commit: DragCommit) -> Self {
        LockCommand::LockCells {
            cells: commit.cells,
            extend: commit.extend,
        }
    }
}

/// Outcome of executing a command or event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// State changed.
    Success,
    /// Valid request with nothing to do.
    Unchanged,
}

/// Apply `command` to `state`, returning the next state.
///
/// The result equals `state` when the command is a semantic no-op.
pub fn reduce(
    state: &CoreState,
    command: &Command,
    config: &EditorConfig,
) -> Result<CoreState, CommandError> {
    debug!(?command, "reduce");
    let mut next = state.clone();
    match command {
        Command::Grid(cmd) => reduce_grid(&mut next, cmd, config.background)?,
        Command::Paint(cmd) => reduce_paint(&mut next, cmd, config.background)?,
        Command::Selection(cmd) => reduce_selection(&mut next, cmd)?,
        Command::Lock(cmd) => reduce_lock(&mut next, cmd)?,
        Command::Tool(cmd) => reduce_tool(&mut next, cmd),
    }
    Ok(next)
}

fn reduce_grid(
    state: &mut CoreState,
    command: &GridCommand,
    background: Color,
) -> Result<(), CommandError> {
    let dims = state.dimensions();
    match command {
        GridCommand::Resize { width, height } => {
            let new_dims = Dimensions::new(*width, *height)?;
            let palette = state.palette.reshape(new_dims, background);
            reflow(state, palette, |i| {
                let (row, col) = dims.row_col(i);
                new_dims.checked_index(row as isize, col as isize)
            });
        }
        GridCommand::PopSection(edge) => {
            let line = match edge {
                PopEdge::Top => Line::Row(0),
                PopEdge::Bottom => Line::Row(dims.height - 1),
                PopEdge::Left => Line::Column(0),
                PopEdge::Right => Line::Column(dims.width - 1),
            };
            remove_line(state, line);
        }
        GridCommand::RemoveLine(line) => {
            line.check(dims)?;
            remove_line(state, *line);
        }
        GridCommand::ClearLine(line) => {
            line.check(dims)?;
            let before = state.palette.clone();
            state.palette = match line {
                Line::Row(row) => before.clear_row(*row, background),
                Line::Column(column) => before.clear_column(*column, background),
            };
            state.palette.restore_locked(&before, &state.locked_cells);
        }
        GridCommand::CopyLine(line) => {
            line.check(dims)?;
            state.copied_line = Some(*line);
        }
        GridCommand::PasteLine(target) => {
            target.check(dims)?;
            let before = state.palette.clone();
            let pasted = match (state.copied_line, target) {
                (Some(Line::Row(source)), Line::Row(target)) if source != *target => {
                    before.paste_row(source, *target)
                }
                (Some(Line::Column(source)), Line::Column(target)) if source != *target => {
                    before.paste_column(source, *target)
                }
                _ => return Ok(()),
            };
            state.palette = pasted;
            state.palette.restore_locked(&before, &state.locked_cells);
            state.copied_line = None;
        }
        GridCommand::TransformLayout(layout) => {
            let palette = state.palette.transform_layout(*layout, background);
            if palette.dimensions() != dims {
                reflow(state, palette, Some);
            }
        }
        GridCommand::LoadPalette(palette) => {
            let new_dims = palette.dimensions();
            reflow(state, palette.clone(), |i| {
                let (row, col) = dims.row_col(i);
                new_dims.checked_index(row as isize, col as isize)
            });
        }
    }
    Ok(())
}

fn remove_line(state: &mut CoreState, line: Line) {
    let dims = state.dimensions();
    let palette = match line {
        Line::Row(row) => state.palette.remove_row(row),
        Line::Column(column) => state.palette.remove_column(column),
    };
    if palette.dimensions() == dims {
        return;
    }
    let new_dims = palette.dimensions();
    reflow(state, palette, |i| {
        let (row, col) = dims.row_col(i);
        let (row, col) = match line {
            Line::Row(removed) if row == removed => return None,
            Line::Row(removed) if row > removed => (row - 1, col),
            Line::Column(removed) if col == removed => return None,
            Line::Column(removed) if col > removed => (row, col - 1),
            _ => (row, col),
        };
        new_dims.checked_index(row as isize, col as isize)
    });
}

/// Install a reshaped palette and carry selections and locks across.
///
/// `map` sends an old cell index to its new index (or drops it). Clipboards
/// refer to the old shape and are cleared.
fn reflow<F>(state: &mut CoreState, palette: Palette, map: F)
where
    F: Fn(usize) -> Option<usize>,
{
    let remap = |set: &CellSet| -> CellSet { set.iter().filter_map(&map).collect() };
    state.selected_cells = remap(&state.selected_cells);
    state.locked_cells = remap(&state.locked_cells);
    state.selected_cell = state.selected_cell.and_then(&map);
    state.copied_cells = None;
    state.copied_line = None;
    state.palette = palette;
}

fn reduce_paint(
    state: &mut CoreState,
    command: &PaintCommand,
    background: Color,
) -> Result<(), CommandError> {
    let dims = state.dimensions();
    let color = state.selected_color;
    let locked = &state.locked_cells;
    match command {
        PaintCommand::PaintCell { cell } => {
            dims.check_cell(*cell)?;
            state.palette = state.palette.fill_cells([*cell], color, locked);
        }
        PaintCommand::SetCellColor { cell, color } => {
            dims.check_cell(*cell)?;
            state.palette = state.palette.fill_cells([*cell], *color, locked);
        }
        PaintCommand::FillAll => {
            state.palette = state.palette.fill_all(color, locked);
        }
        PaintCommand::FillSelected => {
            state.palette = state
                .palette
                .fill_cells(state.selected_cells.iter(), color, locked);
        }
        PaintCommand::FillLine(line) => {
            line.check(dims)?;
            state.palette = match line {
                Line::Row(row) => state.palette.fill_row(*row, color, locked),
                Line::Column(column) => state.palette.fill_column(*column, color, locked),
            };
        }
        PaintCommand::SetSelectedColor(color) => {
            state.palette = state
                .palette
                .fill_cells(state.selected_cells.iter(), *color, locked);
        }
        PaintCommand::ClearSelected => {
            state.palette = state
                .palette
                .fill_cells(state.selected_cells.iter(), background, locked);
        }
        PaintCommand::PasteCells { target } => {
            dims.check_cell(*target)?;
            if let Some(clipboard) = state.copied_cells.take() {
                state.palette = clipboard.paste(*target, &state.palette, &state.locked_cells);
            }
        }
        PaintCommand::MoveSelection { target } => {
            dims.check_cell(*target)?;
            if let Some((rows, columns)) = state.palette.move_offset(&state.selected_cells, *target)
            {
                move_selection(state, rows, columns, background);
            }
        }
        PaintCommand::MoveSelectionBy { rows, columns } => {
            move_selection(state, *rows, *columns, background);
        }
        PaintCommand::RotateSelection(direction) => {
            if state.selected_cells.is_empty() {
                return Ok(());
            }
            state.palette = state.palette.rotate90(
                &state.selected_cells,
                *direction,
                &state.locked_cells,
                background,
            );
            state.selected_cells = state
                .selected_cells
                .iter()
                .filter_map(|i| rotated_index(i, *direction, dims))
                .collect();
            state.selected_cell = None;
        }
    }
    Ok(())
}

fn move_selection(state: &mut CoreState, rows: isize, columns: isize, background: Color) {
    if state.selected_cells.is_empty() || (rows == 0 && columns == 0) {
        return;
    }
    let dims = state.dimensions();
    state.palette = state.palette.move_cells(
        &state.selected_cells,
        rows,
        columns,
        &state.locked_cells,
        background,
    );
    state.selected_cells = state
        .selected_cells
        .iter()
        .filter_map(|i| dims.offset(i, rows, columns))
        .collect();
    state.selected_cell = None;
}

fn rotated_index(index: usize, direction: RotateDirection, dims: Dimensions) -> Option<usize> {
    let (row, col) = dims.row_col(index);
    let (row, col) = (row as isize, col as isize);
    match direction {
        RotateDirection::Left => dims.checked_index(col, dims.height as isize - 1 - row),
        RotateDirection::Right => dims.checked_index(dims.width as isize - 1 - col, row),
    }
}

fn check_cells(dims: Dimensions, cells: &CellSet) -> Result<(), CommandError> {
    cells.iter().try_for_each(|cell| dims.check_cell(cell))
}

fn reduce_selection(state: &mut CoreState, command: &SelectionCommand) -> Result<(), CommandError> {
    let dims = state.dimensions();
    match command {
        SelectionCommand::Click { cell, shift } => {
            dims.check_cell(*cell)?;
            selection::select_cell(state, *cell, *shift);
        }
        SelectionCommand::Toggle { cell } => {
            dims.check_cell(*cell)?;
            selection::toggle_select(state, *cell);
        }
        SelectionCommand::ToggleMulti { cell } => {
            dims.check_cell(*cell)?;
            selection::toggle_multi(state, *cell);
        }
        SelectionCommand::SelectLine { line, modifiers } => {
            line.check(dims)?;
            selection::select_line(state, *line, *modifiers);
        }
        SelectionCommand::SelectCells { cells, extend } => {
            check_cells(dims, cells)?;
            selection::commit_drag(
                state,
                DragCommit {
                    cells: cells.clone(),
                    extend: *extend,
                },
            );
        }
        SelectionCommand::SelectAll => selection::select_all(state),
        SelectionCommand::Clear => selection::clear(state),
        SelectionCommand::Copy => {
            if let Some(clipboard) =
                CellClipboard::copy(&state.selected_cells, &state.palette, &state.locked_cells)
            {
                state.copied_cells = Some(clipboard);
            }
        }
        SelectionCommand::CancelClipboard => state.copied_cells = None,
    }
    Ok(())
}

fn reduce_lock(state: &mut CoreState, command: &LockCommand) -> Result<(), CommandError> {
    let dims = state.dimensions();
    match command {
        LockCommand::Toggle { cell, shift } => {
            dims.check_cell(*cell)?;
            lock::toggle_lock(state, *cell, *shift);
        }
        LockCommand::LockCells { cells, extend } => {
            check_cells(dims, cells)?;
            lock::commit_drag(
                state,
                DragCommit {
                    cells: cells.clone(),
                    extend: *extend,
                },
            );
        }
        LockCommand::LockSelected => lock::lock_selected(state),
        LockCommand::UnlockSelected => lock::unlock_selected(state),
        LockCommand::LockAll => lock::lock_all(state),
        LockCommand::UnlockAll => lock::unlock_all(state),
    }
    Ok(())
}

fn reduce_tool(state: &mut CoreState, command: &ToolCommand) {
    match command {
        ToolCommand::Select(tool) if tool.is_immediate() => run_immediate(state, *tool),
        ToolCommand::Select(tool) => state.selected_tool = Some(*tool),
        ToolCommand::Deselect => state.selected_tool = None,
        ToolCommand::SetColor(color) => state.selected_color = *color,
    }
}

fn run_immediate(state: &mut CoreState, tool: Tool) {
    let color = state.selected_color;
    match tool {
        Tool::LockSelected => lock::lock_selected(state),
        Tool::UnlockSelected => lock::unlock_selected(state),
        Tool::LockAll => lock::lock_all(state),
        Tool::UnlockAll => lock::unlock_all(state),
        Tool::FillAll => state.palette = state.palette.fill_all(color, &state.locked_cells),
        Tool::FillSelected => {
            state.palette =
                state
                    .palette
                    .fill_cells(state.selected_cells.iter(), color, &state.locked_cells)
        }
        Tool::Paint
        | Tool::Select
        | Tool::MultiSelect
        | Tool::BoxSelect
        | Tool::RopeSelect
        | Tool::Lock
        | Tool::BoxLock
        | Tool::RopeLock
        | Tool::FillRow
        | Tool::FillColumn
        | Tool::RowSelect
        | Tool::ColumnSelect
        | Tool::Transform
        | Tool::Move
        | Tool::RotateLeft90
        | Tool::RotateRight90 => {}
    }
}
