//! Tool dispatcher.
//!
//! Maps `(tool, event, CoreState, UiState)` to a [`Transition`]: the commands
//! to reduce into the next [`CoreState`] (committed to history as one step),
//! the next [`UiState`], and an optional undo/redo request. Nothing here
//! mutates its inputs.
//!
//! Cell clicks resolve in a fixed order, first match wins:
//!
//! 1. `move` with a selection moves it onto the clicked cell and reverts to `select`
//! 2. a rotate tool with a selection rotates it and reverts to `select`
//! 3. `paint` (or no tool) on a locked cell does nothing; `paint` without
//!    shift paints
//! 4. `rowselect` / `columnselect` select the clicked line
//! 5. `fillrow` / `fillcolumn` fill the clicked line
//! 6. `lock` toggles the clicked cell's lock
//! 7. `select` toggles the single-cell selection (`multiselect` toggles membership)
//! 8. with a cell clipboard and no shift, paste at the clicked cell
//! 9. otherwise select the clicked cell (shift extends)
//!
//! Box and rope tools ignore clicks: their selection is committed on
//! pointer-up.

use crate::commands::{Command, LockCommand, PaintCommand, SelectionCommand, ToolCommand};
use crate::config::EditorConfig;
use crate::drag::{DragGesture, DragShape};
use crate::error::CommandError;
use crate::geometry::Line;
use crate::palette::RotateDirection;
use crate::preview;
use crate::state::{CoreState, UiState};
use crate::tool::Tool;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    /// Shift held.
    pub shift: bool,
    /// Control held.
    pub ctrl: bool,
    /// Meta / command held.
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        meta: false,
    };

    /// Only shift held.
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        meta: false,
    };

    /// Ctrl or meta held (the platform command key).
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    /// Button pressed over a cell.
    Down,
    /// Pointer entered a cell (pressed or not).
    Move,
    /// Button released. A cell outside the grid means the release happened
    /// off the grid and cancels any drag in progress.
    Up,
    /// Full click on a cell.
    Click,
    /// Pointer left the cell. Drags continue into the next cell.
    Leave,
}

/// Pointer event over a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Event phase.
    pub kind: PointerKind,
    /// Cell under the pointer.
    pub cell: usize,
    /// Modifier state.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Build an event.
    pub fn new(kind: PointerKind, cell: usize, modifiers: Modifiers) -> Self {
        Self {
            kind,
            cell,
            modifiers,
        }
    }

    /// Button released somewhere off the grid.
    pub fn released_outside(modifiers: Modifiers) -> Self {
        Self::new(PointerKind::Up, usize::MAX, modifiers)
    }
}

/// Recognized key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Escape.
    Escape,
    /// A printable character.
    Char(char),
    /// Anything else.
    Other,
}

/// Keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key pressed.
    pub key: Key,
    /// Modifier state.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Build an event.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// History request produced by a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    /// Step back.
    Undo,
    /// Step forward.
    Redo,
}

/// Everything an event asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Commands reduced in order into one history step.
    pub commands: Vec<Command>,
    /// UI state after the event.
    pub ui: UiState,
    /// Undo/redo request, applied instead of `commands`.
    pub history: Option<HistoryAction>,
}

impl Transition {
    fn ui(ui: UiState) -> Self {
        Self {
            commands: Vec::new(),
            ui,
            history: None,
        }
    }

    fn with(ui: UiState, commands: Vec<Command>) -> Self {
        Self {
            commands,
            ui,
            history: None,
        }
    }
}

/// Dispatch a pointer event.
pub fn dispatch_pointer(
    core: &CoreState,
    ui: &UiState,
    event: PointerEvent,
    config: &EditorConfig,
) -> Result<Transition, CommandError> {
    let mut ui = ui.clone();
    if event.kind == PointerKind::Up && !core.dimensions().contains(event.cell) {
        trace!(?event, "pointer released outside grid");
        ui.selection_drag.cancel();
        ui.lock_drag.cancel();
        return Ok(Transition::ui(ui));
    }
    core.dimensions().check_cell(event.cell)?;
    trace!(?event, tool = ?core.selected_tool, "dispatch pointer");

    let transition = match event.kind {
        PointerKind::Down => {
            pointer_down(core, &mut ui, event);
            Transition::ui(ui)
        }
        PointerKind::Move => {
            pointer_move(core, &mut ui, event.cell, config);
            Transition::ui(ui)
        }
        PointerKind::Up => {
            let commands = pointer_up(&mut ui, event.modifiers.shift);
            Transition::with(ui, commands)
        }
        PointerKind::Click => {
            let commands = click(core, &mut ui, event.cell, event.modifiers);
            Transition::with(ui, commands)
        }
        PointerKind::Leave => {
            ui.preview_palette = None;
            Transition::ui(ui)
        }
    };
    Ok(transition)
}

fn pointer_down(core: &CoreState, ui: &mut UiState, event: PointerEvent) {
    let extend = event.modifiers.shift;
    match core.selected_tool {
        Some(Tool::BoxSelect) => {
            ui.selection_drag = DragGesture::begin(DragShape::Box, event.cell, extend)
        }
        Some(Tool::RopeSelect) => {
            ui.selection_drag = DragGesture::begin(DragShape::Rope, event.cell, extend)
        }
        Some(Tool::BoxLock) => {
            ui.lock_drag = DragGesture::begin(DragShape::Box, event.cell, extend)
        }
        Some(Tool::RopeLock) => {
            ui.lock_drag = DragGesture::begin(DragShape::Rope, event.cell, extend)
        }
        _ => {}
    }
}

fn pointer_move(core: &CoreState, ui: &mut UiState, cell: usize, config: &EditorConfig) {
    let dims = core.dimensions();
    if ui.selection_drag.is_active() {
        ui.selection_drag.update(cell, dims);
    } else if ui.lock_drag.is_active() {
        ui.lock_drag.update(cell, dims);
    } else if core.selected_tool == Some(Tool::Move) {
        ui.preview_palette = preview::move_to(core, cell, config.background);
    } else if core.copied_cells.is_some() {
        ui.preview_palette = preview::paste(core, cell);
    }
}

fn pointer_up(ui: &mut UiState, shift: bool) -> Vec<Command> {
    let mut commands: Vec<Command> = Vec::new();
    if let Some(commit) = ui.selection_drag.finish(shift) {
        commands.push(Command::Selection(commit.into()));
    }
    if let Some(commit) = ui.lock_drag.finish(shift) {
        commands.push(Command::Lock(commit.into()));
    }
    commands
}

fn click(core: &CoreState, ui: &mut UiState, cell: usize, modifiers: Modifiers) -> Vec<Command> {
    let tool = core.selected_tool;
    let has_selection = !core.selected_cells.is_empty();
    let revert = Command::Tool(ToolCommand::Select(Tool::Select));

    match tool {
        Some(t) if t.is_drag() => return Vec::new(),
        Some(Tool::Move) if has_selection => {
            ui.preview_palette = None;
            return vec![PaintCommand::MoveSelection { target: cell }.into(), revert];
        }
        Some(Tool::RotateLeft90) if has_selection => {
            ui.rotation_preview = None;
            return vec![
                PaintCommand::RotateSelection(RotateDirection::Left).into(),
                revert,
            ];
        }
        Some(Tool::RotateRight90) if has_selection => {
            ui.rotation_preview = None;
            return vec![
                PaintCommand::RotateSelection(RotateDirection::Right).into(),
                revert,
            ];
        }
        Some(Tool::Paint) | None if core.locked_cells.contains(cell) => return Vec::new(),
        Some(Tool::Paint) if !modifiers.shift => {
            return vec![PaintCommand::PaintCell { cell }.into()];
        }
        _ => {}
    }

    let dims = core.dimensions();
    let (row, col) = dims.row_col(cell);
    let command: Command = match tool {
        Some(Tool::RowSelect) => SelectionCommand::SelectLine {
            line: Line::Row(row),
            modifiers,
        }
        .into(),
        Some(Tool::ColumnSelect) => SelectionCommand::SelectLine {
            line: Line::Column(col),
            modifiers,
        }
        .into(),
        Some(Tool::FillRow) => PaintCommand::FillLine(Line::Row(row)).into(),
        Some(Tool::FillColumn) => PaintCommand::FillLine(Line::Column(col)).into(),
        Some(Tool::Lock) => LockCommand::Toggle {
            cell,
            shift: modifiers.shift,
        }
        .into(),
        Some(Tool::Select) => SelectionCommand::Toggle { cell }.into(),
        Some(Tool::MultiSelect) => SelectionCommand::ToggleMulti { cell }.into(),
        _ if core.copied_cells.is_some() && !modifiers.shift => {
            ui.preview_palette = None;
            PaintCommand::PasteCells { target: cell }.into()
        }
        _ => SelectionCommand::Click {
            cell,
            shift: modifiers.shift,
        }
        .into(),
    };
    vec![command]
}

/// Dispatch a keyboard event.
///
/// Escape cancels the cell clipboard, any preview or drag, and a rotate tool.
/// Ctrl/Meta+Z undoes; Ctrl/Meta+Y and Ctrl/Meta+Shift+Z redo. Other keys
/// produce an empty transition.
pub fn dispatch_key(core: &CoreState, ui: &UiState, event: KeyEvent) -> Transition {
    trace!(?event, "dispatch key");
    let mut ui = ui.clone();
    match event.key {
        Key::Escape => {
            let mut commands: Vec<Command> = Vec::new();
            if core.copied_cells.is_some() {
                commands.push(SelectionCommand::CancelClipboard.into());
            }
            if core.selected_tool.is_some_and(Tool::is_rotate) {
                commands.push(ToolCommand::Deselect.into());
                ui.rotation_preview = None;
            }
            ui.preview_palette = None;
            ui.selection_drag.cancel();
            ui.lock_drag.cancel();
            Transition::with(ui, commands)
        }
        Key::Char(c) if event.modifiers.command() => {
            let history = match c.to_ascii_lowercase() {
                'z' if event.modifiers.shift => Some(HistoryAction::Redo),
                'z' => Some(HistoryAction::Undo),
                'y' => Some(HistoryAction::Redo),
                _ => None,
            };
            Transition {
                commands: Vec::new(),
                ui,
                history,
            }
        }
        Key::Char(_) | Key::Other => Transition::ui(ui),
    }
}

/// Dispatch a context-menu (right-click) request.
///
/// The menu itself is always suppressed; an active cell clipboard is cancelled.
pub fn dispatch_context_menu(core: &CoreState, ui: &UiState) -> Transition {
    let mut ui = ui.clone();
    if core.copied_cells.is_none() {
        return Transition::ui(ui);
    }
    ui.preview_palette = None;
    Transition::with(ui, vec![SelectionCommand::CancelClipboard.into()])
}
