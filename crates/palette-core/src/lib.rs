#![warn(missing_docs)]
//! Palette Core - Headless Color-Grid Editor Engine
//!
//! # Overview
//!
//! `palette-core` is the state engine behind a grid-based color palette
//! editor. It owns the cell colors, the selection, the lock set, the
//! clipboards and the undo history, and turns pointer and keyboard events
//! into state transitions. It does not draw anything: frontends read a
//! [`GridSnapshot`] and render it however they like.
//!
//! # Core Features
//!
//! - **Pure reducer**: every edit is a [`Command`] applied by [`reduce`]
//! - **Locks**: locked cells are immune to every palette write
//! - **Selections**: click, toggle, row/column, box and rope selection
//! - **Transforms**: resize, pop, remove, layout reflow, move and rotate
//! - **Clipboards**: arbitrary cell shapes and whole rows/columns
//! - **Undo/Redo**: whole-state snapshots, one step per user action
//! - **State Tracking**: version number mechanism and change notifications
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  PaletteEditor (history, UI state, events)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Dispatcher (tool x event -> Transition)    │  ← Input mapping
//! ├─────────────────────────────────────────────┤
//! │  Reducer (Command -> CoreState)             │  ← State transitions
//! ├─────────────────────────────────────────────┤
//! │  Selection / Lock / Clipboard / Drag        │  ← Interaction rules
//! ├─────────────────────────────────────────────┤
//! │  Palette operations (pure)                  │  ← Grid transforms
//! ├─────────────────────────────────────────────┤
//! │  Color / Dimensions / CellSet               │  ← Value types
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Using Events
//!
//! ```rust
//! use palette_core::{Modifiers, PaletteEditor, PointerEvent, PointerKind, Tool, ToolCommand};
//!
//! let mut editor = PaletteEditor::default();
//!
//! editor.execute(ToolCommand::Select(Tool::BoxSelect)).unwrap();
//! editor.pointer(PointerEvent::new(PointerKind::Down, 0, Modifiers::NONE)).unwrap();
//! editor.pointer(PointerEvent::new(PointerKind::Move, 17, Modifiers::NONE)).unwrap();
//! editor.pointer(PointerEvent::new(PointerKind::Up, 17, Modifiers::NONE)).unwrap();
//!
//! assert_eq!(editor.core().selected_cells.as_slice(), &[0, 1, 16, 17]);
//! ```
//!
//! ## Using Commands
//!
//! ```rust
//! use palette_core::{Color, GridCommand, PaintCommand, PaletteEditor, ToolCommand};
//!
//! let mut editor = PaletteEditor::default();
//! editor.execute(ToolCommand::SetColor(Color::rgb(255, 0, 0))).unwrap();
//! editor.execute(PaintCommand::FillAll).unwrap();
//! editor.execute(GridCommand::Resize { width: 4, height: 2 }).unwrap();
//!
//! let snapshot = editor.snapshot();
//! assert_eq!(snapshot.cells.len(), 8);
//! assert_eq!(snapshot.cells[0].color.to_hex(), "#ff0000");
//! ```
//!
//! # Module Description
//!
//! - [`color`] - RGB colors and hex parsing
//! - [`cell_set`] - Insertion-ordered cell index sets
//! - [`geometry`] - Dimensions, index math and cell-set geometry
//! - [`palette`] - Pure palette transforms
//! - [`selection`] / [`lock`] - Selection and lock rules
//! - [`clipboard`] - Cell and row/column clipboards
//! - [`drag`] - Box and rope gestures
//! - [`history`] - Undo/redo snapshots
//! - [`tool`] - Tool identifiers and their names
//! - [`config`] - JSON editor configuration
//! - [`error`] - Command and configuration errors
//! - [`commands`] - Command types and the reducer
//! - [`dispatch`] - Tool/event dispatcher
//! - [`preview`] - Hover and rotation previews
//! - [`snapshot`] - Headless render snapshot
//! - [`state`] - Editor state container and change notifications

pub mod cell_set;
pub mod clipboard;
pub mod color;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod history;
pub mod lock;
pub mod palette;
pub mod preview;
pub mod selection;
pub mod snapshot;
pub mod state;
pub mod tool;

pub use cell_set::CellSet;
pub use clipboard::{CellClipboard, LineClipboard};
pub use color::{Color, ColorError};
pub use commands::{
    Command, CommandResult, GridCommand, LockCommand, PaintCommand, SelectionCommand, ToolCommand,
    reduce,
};
pub use config::EditorConfig;
pub use dispatch::{
    HistoryAction, Key, KeyEvent, Modifiers, PointerEvent, PointerKind, Transition,
    dispatch_context_menu, dispatch_key, dispatch_pointer,
};
pub use drag::{DragCommit, DragGesture, DragShape};
pub use error::{CommandError, ConfigError};
pub use geometry::{Dimensions, GridLayout, Line, PopEdge};
pub use history::{DEFAULT_MAX_DEPTH, History};
pub use palette::{Palette, RotateDirection};
pub use snapshot::{CellView, GridSnapshot};
pub use state::{
    CoreState, PaletteEditor, StateChange, StateChangeCallback, StateChangeType, UiState,
};
pub use tool::{ParseToolError, Tool};
