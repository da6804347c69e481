//! Editor State Interface
//!
//! Holds the undoable [`CoreState`] inside a [`History`], the ephemeral
//! [`UiState`] next to it, and funnels every event through the dispatcher and
//! reducer.
//!
//! # Overview
//!
//! - **Single writer**: [`PaletteEditor`] owns both states; frontends read
//!   them through `&` views or a [`GridSnapshot`]
//! - **One history step per event**: all commands produced by one event are
//!   reduced together and pushed once; no-ops are not pushed
//! - **Version Tracking**: the version increments only when something changed
//! - **Change Notifications**: subscribers are told what kind of change happened
//!
//! # Example
//!
//! ```rust
//! use palette_core::{
//!     Modifiers, PaletteEditor, PointerEvent, PointerKind, Tool, ToolCommand,
//! };
//!
//! let mut editor = PaletteEditor::default();
//! editor.subscribe(|change| {
//!     println!("{:?}: {} -> {}", change.change_type, change.old_version, change.new_version);
//! });
//!
//! editor.execute(ToolCommand::Select(Tool::Paint)).unwrap();
//! editor
//!     .pointer(PointerEvent::new(PointerKind::Click, 0, Modifiers::NONE))
//!     .unwrap();
//!
//! assert_eq!(editor.core().palette.get(0).unwrap().to_hex(), "#000000");
//! assert!(editor.can_undo());
//! editor.undo();
//! assert_eq!(editor.core().palette.get(0).unwrap().to_hex(), "#ffffff");
//! ```

use crate::cell_set::CellSet;
use crate::clipboard::{CellClipboard, LineClipboard};
use crate::color::Color;
use crate::commands::{Command, CommandResult, reduce};
use crate::config::EditorConfig;
use crate::dispatch::{
    HistoryAction, KeyEvent, PointerEvent, Transition, dispatch_context_menu, dispatch_key,
    dispatch_pointer,
};
use crate::drag::DragGesture;
use crate::error::CommandError;
use crate::geometry::{Dimensions, Line};
use crate::history::History;
use crate::palette::Palette;
use crate::preview;
use crate::snapshot::GridSnapshot;
use crate::tool::Tool;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Undoable editor state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreState {
    /// Grid contents; owns the dimensions.
    pub palette: Palette,
    /// Paint color.
    pub selected_color: Color,
    /// Active tool (`None` after a rotate tool is cancelled).
    pub selected_tool: Option<Tool>,
    /// Single-cell selection of the `select` tool.
    pub selected_cell: Option<usize>,
    /// Multi-cell selection, in insertion order.
    pub selected_cells: CellSet,
    /// Arbitrary-shape clipboard.
    pub copied_cells: Option<CellClipboard>,
    /// Copied row or column.
    pub copied_line: Option<LineClipboard>,
    /// Cells immune to palette writes.
    pub locked_cells: CellSet,
}

impl CoreState {
    /// Fresh state around `palette`, with the `paint` tool.
    pub fn new(palette: Palette, selected_color: Color) -> Self {
        Self {
            palette,
            selected_color,
            selected_tool: Some(Tool::Paint),
            selected_cell: None,
            selected_cells: CellSet::new(),
            copied_cells: None,
            copied_line: None,
            locked_cells: CellSet::new(),
        }
    }

    /// Initial state described by `config`.
    ///
    /// Zero dimensions fall back to the default 16x16 grid.
    pub fn from_config(config: &EditorConfig) -> Self {
        let dims = config.dimensions();
        let dims = if dims.validate().is_ok() {
            dims
        } else {
            Dimensions::default()
        };
        let mut state = Self::new(Palette::filled(dims, config.background), config.default_color);
        state.selected_tool = Some(config.default_tool);
        state
    }

    /// Grid size.
    pub fn dimensions(&self) -> Dimensions {
        self.palette.dimensions()
    }

    /// Copied row, if any.
    pub fn copied_row(&self) -> Option<usize> {
        self.copied_line.and_then(Line::row)
    }

    /// Copied column, if any.
    pub fn copied_column(&self) -> Option<usize> {
        self.copied_line.and_then(Line::column)
    }

    /// Whether `cell` is locked.
    pub fn is_locked(&self, cell: usize) -> bool {
        self.locked_cells.contains(cell)
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

/// Ephemeral interaction state, never recorded in history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Hover preview (paste, row/column paste, move).
    pub preview_palette: Option<Palette>,
    /// Preview of the active rotate tool.
    pub rotation_preview: Option<Palette>,
    /// Box/rope selection drag.
    pub selection_drag: DragGesture,
    /// Box/rope lock drag.
    pub lock_drag: DragGesture,
}

impl UiState {
    /// Cells covered by the in-progress selection drag.
    pub fn temp_selected_cells(&self) -> &[usize] {
        self.selection_drag
            .cells()
            .map(CellSet::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a selection drag is in progress.
    pub fn is_selecting(&self) -> bool {
        self.selection_drag.is_active()
    }

    /// Anchor of the in-progress box selection.
    pub fn selection_start(&self) -> Option<usize> {
        self.selection_drag.anchor()
    }

    /// Waypoints of the in-progress rope selection.
    pub fn rope_points(&self) -> &[usize] {
        self.selection_drag.points()
    }

    /// Cells covered by the in-progress lock drag.
    pub fn temp_locked_cells(&self) -> &[usize] {
        self.lock_drag.cells().map(CellSet::as_slice).unwrap_or(&[])
    }

    /// Whether a lock drag is in progress.
    pub fn is_locking(&self) -> bool {
        self.lock_drag.is_active()
    }

    /// Anchor of the in-progress box lock.
    pub fn lock_start(&self) -> Option<usize> {
        self.lock_drag.anchor()
    }

    /// Waypoints of the in-progress rope lock.
    pub fn lock_rope_points(&self) -> &[usize] {
        self.lock_drag.points()
    }
}

/// State change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeType {
    /// Grid size changed
    DimensionsChanged,
    /// Cell colors changed
    PaletteModified,
    /// Lock set changed
    LocksChanged,
    /// Selection changed
    SelectionChanged,
    /// A clipboard was set or cleared
    ClipboardChanged,
    /// Tool or paint color changed
    ToolChanged,
    /// Only previews or drag state changed
    InteractionChanged,
}

impl StateChangeType {
    /// Most significant difference between two core states, if any.
    pub fn between(before: &CoreState, after: &CoreState) -> Option<Self> {
        if before.dimensions() != after.dimensions() {
            Some(StateChangeType::DimensionsChanged)
        } else if before.palette != after.palette {
            Some(StateChangeType::PaletteModified)
        } else if before.locked_cells != after.locked_cells {
            Some(StateChangeType::LocksChanged)
        } else if before.selected_cells != after.selected_cells
            || before.selected_cell != after.selected_cell
        {
            Some(StateChangeType::SelectionChanged)
        } else if before.copied_cells != after.copied_cells
            || before.copied_line != after.copied_line
        {
            Some(StateChangeType::ClipboardChanged)
        } else if before.selected_tool != after.selected_tool
            || before.selected_color != after.selected_color
        {
            Some(StateChangeType::ToolChanged)
        } else {
            None
        }
    }
}

/// State change record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// Change type
    pub change_type: StateChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
}

/// State change callback function type
pub type StateChangeCallback = Box<dyn FnMut(&StateChange) + Send>;

/// Editor state container.
///
/// Frontends feed pointer, key and context-menu events (or direct
/// [`Command`]s) in, and read [`core`](Self::core), [`ui`](Self::ui) or a
/// [`snapshot`](Self::snapshot) out.
pub struct PaletteEditor {
    history: History<CoreState>,
    ui: UiState,
    config: EditorConfig,
    version: u64,
    callbacks: Vec<StateChangeCallback>,
}

impl PaletteEditor {
    /// Create an editor from `config`.
    pub fn new(config: EditorConfig) -> Self {
        let core = CoreState::from_config(&config);
        Self {
            history: History::with_depth(core, config.history_limit),
            ui: UiState::default(),
            config,
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Committed state.
    pub fn core(&self) -> &CoreState {
        self.history.present()
    }

    /// Interaction state.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Configuration in use.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Render snapshot of the current state.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.core(), &self.ui)
    }

    /// State version; increments once per effective change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the state changed after `version`.
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.version > version
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo depth.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Redo depth.
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Subscribe to state changes.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Execute a command as one history step.
    pub fn execute(&mut self, command: impl Into<Command>) -> Result<CommandResult, CommandError> {
        let ui = self.ui.clone();
        self.apply(Transition {
            commands: vec![command.into()],
            ui,
            history: None,
        })
    }

    /// Execute several commands as one history step.
    pub fn execute_all<I>(&mut self, commands: I) -> Result<CommandResult, CommandError>
    where
        I: IntoIterator<Item = Command>,
    {
        let ui = self.ui.clone();
        self.apply(Transition {
            commands: commands.into_iter().collect(),
            ui,
            history: None,
        })
    }

    /// Handle a pointer event over a cell.
    pub fn pointer(&mut self, event: PointerEvent) -> Result<CommandResult, CommandError> {
        let transition = dispatch_pointer(self.core(), &self.ui, event, &self.config)?;
        self.apply(transition)
    }

    /// Handle a key press.
    pub fn key(&mut self, event: KeyEvent) -> Result<CommandResult, CommandError> {
        let transition = dispatch_key(self.core(), &self.ui, event);
        self.apply(transition)
    }

    /// Handle a context-menu request.
    pub fn context_menu(&mut self) -> Result<CommandResult, CommandError> {
        let transition = dispatch_context_menu(self.core(), &self.ui);
        self.apply(transition)
    }

    /// Preview pasting the copied row/column onto a hovered header.
    pub fn hover_line(&mut self, line: Line) -> CommandResult {
        let preview = preview::paste_line(self.core(), line);
        self.set_preview(preview)
    }

    /// Drop any hover preview.
    pub fn hover_end(&mut self) -> CommandResult {
        self.set_preview(None)
    }

    /// Step back one history entry.
    pub fn undo(&mut self) -> CommandResult {
        self.step(HistoryAction::Undo)
    }

    /// Step forward one history entry.
    pub fn redo(&mut self) -> CommandResult {
        self.step(HistoryAction::Redo)
    }

    fn set_preview(&mut self, preview: Option<Palette>) -> CommandResult {
        if self.ui.preview_palette == preview {
            return CommandResult::Unchanged;
        }
        self.ui.preview_palette = preview;
        self.bump(StateChangeType::InteractionChanged);
        CommandResult::Success
    }

    fn step(&mut self, action: HistoryAction) -> CommandResult {
        let before = self.core().clone();
        let moved = match action {
            HistoryAction::Undo => self.history.undo(),
            HistoryAction::Redo => self.history.redo(),
        };
        if !moved {
            return CommandResult::Unchanged;
        }
        debug!(?action, version = self.version, "history step");
        self.ui.preview_palette = None;
        if before.dimensions() != self.core().dimensions() {
            self.ui.selection_drag.cancel();
            self.ui.lock_drag.cancel();
        }
        self.refresh_rotation_preview();
        let change_type = StateChangeType::between(&before, self.core())
            .unwrap_or(StateChangeType::InteractionChanged);
        self.bump(change_type);
        CommandResult::Success
    }

    fn apply(&mut self, transition: Transition) -> Result<CommandResult, CommandError> {
        if let Some(action) = transition.history {
            return Ok(self.step(action));
        }

        let before = self.core();
        let mut next = before.clone();
        for command in &transition.commands {
            next = reduce(&next, command, &self.config)?;
        }
        let core_change = StateChangeType::between(before, &next);

        let mut ui = transition.ui;
        if core_change == Some(StateChangeType::DimensionsChanged) {
            ui.selection_drag.cancel();
            ui.lock_drag.cancel();
        }
        if core_change.is_some() {
            self.history.push(next);
            ui.preview_palette = None;
        }
        let ui_changed = ui != self.ui;
        self.ui = ui;
        if core_change.is_some() {
            self.refresh_rotation_preview();
        }

        match core_change {
            Some(change_type) => self.bump(change_type),
            None if ui_changed => self.bump(StateChangeType::InteractionChanged),
            None => return Ok(CommandResult::Unchanged),
        }
        Ok(CommandResult::Success)
    }

    fn refresh_rotation_preview(&mut self) {
        self.ui.rotation_preview =
            preview::rotation(self.history.present(), self.config.background);
    }

    fn bump(&mut self, change_type: StateChangeType) {
        let old_version = self.version;
        self.version += 1;
        let change = StateChange {
            change_type,
            old_version,
            new_version: self.version,
        };
        debug!(?change_type, version = self.version, "state changed");
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}

impl Default for PaletteEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl std::fmt::Debug for PaletteEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteEditor")
            .field("core", self.core())
            .field("ui", &self.ui)
            .field("version", &self.version)
            .field("undo_depth", &self.history.undo_depth())
            .field("redo_depth", &self.history.redo_depth())
            .finish_non_exhaustive()
    }
}
