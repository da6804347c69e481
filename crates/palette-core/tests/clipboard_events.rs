use palette_core::{
    Color, CommandResult, EditorConfig, Key, KeyEvent, Line, LockCommand, Modifiers, PaintCommand,
    PaletteEditor, PointerEvent, PointerKind, SelectionCommand, Tool, ToolCommand,
};
use pretty_assertions::assert_eq;

const RED: Color = Color::rgb(255, 0, 0);

fn editor() -> PaletteEditor {
    let mut editor = PaletteEditor::new(EditorConfig {
        width: 4,
        height: 4,
        ..EditorConfig::default()
    });
    editor.execute(ToolCommand::SetColor(RED)).unwrap();
    editor
}

fn event(editor: &mut PaletteEditor, kind: PointerKind, cell: usize) -> CommandResult {
    editor
        .pointer(PointerEvent::new(kind, cell, Modifiers::NONE))
        .unwrap()
}

/// Paint cells 0 and 1, select both, copy.
fn with_clipboard() -> PaletteEditor {
    let mut editor = editor();
    editor.execute(PaintCommand::PaintCell { cell: 0 }).unwrap();
    editor
        .execute(PaintCommand::SetCellColor {
            cell: 1,
            color: Color::BLACK,
        })
        .unwrap();
    editor
        .execute(SelectionCommand::SelectCells {
            cells: [0, 1].into_iter().collect(),
            extend: false,
        })
        .unwrap();
    editor.execute(SelectionCommand::Copy).unwrap();
    editor.execute(ToolCommand::Select(Tool::Transform)).unwrap();
    editor
}

#[test]
fn test_copy_skips_locked_cells() {
    let mut editor = editor();
    editor
        .execute(LockCommand::Toggle {
            cell: 1,
            shift: false,
        })
        .unwrap();
    editor
        .execute(SelectionCommand::SelectCells {
            cells: [0, 1].into_iter().collect(),
            extend: false,
        })
        .unwrap();
    editor.execute(SelectionCommand::Copy).unwrap();
    let clipboard = editor.core().copied_cells.clone().unwrap();
    assert_eq!(clipboard.indices(), &[0]);

    // A fully locked selection copies nothing.
    editor.execute(SelectionCommand::CancelClipboard).unwrap();
    editor
        .execute(SelectionCommand::SelectCells {
            cells: [1].into_iter().collect(),
            extend: false,
        })
        .unwrap();
    assert_eq!(
        editor.execute(SelectionCommand::Copy).unwrap(),
        CommandResult::Unchanged
    );
}

#[test]
fn test_hover_previews_then_click_pastes() {
    let mut editor = with_clipboard();
    event(&mut editor, PointerKind::Move, 10);
    let snapshot = editor.snapshot();
    assert_eq!(snapshot.cells[10].color, RED);
    assert_eq!(snapshot.cells[11].color, Color::BLACK);
    assert!(snapshot.cells[10].is_previewed);
    assert_eq!(editor.core().palette.get(10), Some(Color::WHITE));

    event(&mut editor, PointerKind::Leave, 10);
    assert!(editor.ui().preview_palette.is_none());

    event(&mut editor, PointerKind::Click, 10);
    assert_eq!(editor.core().palette.get(10), Some(RED));
    assert_eq!(editor.core().palette.get(11), Some(Color::BLACK));
    assert!(editor.core().copied_cells.is_none());
    assert!(editor.ui().preview_palette.is_none());
}

#[test]
fn test_paste_drops_out_of_grid_cells() {
    let mut editor = with_clipboard();
    event(&mut editor, PointerKind::Click, 3);
    assert_eq!(editor.core().palette.get(3), Some(RED));
    // Cell 1's copy would land at column 4.
    assert_eq!(editor.core().palette.get(4), Some(Color::WHITE));
}

#[test]
fn test_shift_click_with_clipboard_selects() {
    let mut editor = with_clipboard();
    editor
        .pointer(PointerEvent::new(PointerKind::Click, 10, Modifiers::SHIFT))
        .unwrap();
    assert!(editor.core().copied_cells.is_some());
    assert!(editor.core().selected_cells.contains(10));
}

#[test]
fn test_escape_and_context_menu_cancel_clipboard() {
    let mut editor = with_clipboard();
    event(&mut editor, PointerKind::Move, 5);
    editor
        .key(KeyEvent::new(Key::Escape, Modifiers::NONE))
        .unwrap();
    assert!(editor.core().copied_cells.is_none());
    assert!(editor.ui().preview_palette.is_none());

    let mut editor = with_clipboard();
    assert_eq!(editor.context_menu().unwrap(), CommandResult::Success);
    assert!(editor.core().copied_cells.is_none());
    assert_eq!(editor.context_menu().unwrap(), CommandResult::Unchanged);
}

#[test]
fn test_move_tool_preview_and_commit() {
    let mut editor = editor();
    editor.execute(PaintCommand::PaintCell { cell: 0 }).unwrap();
    editor
        .execute(SelectionCommand::Click {
            cell: 0,
            shift: false,
        })
        .unwrap();
    editor.execute(ToolCommand::Select(Tool::Move)).unwrap();

    event(&mut editor, PointerKind::Move, 15);
    assert_eq!(editor.snapshot().cells[15].color, RED);
    assert_eq!(editor.snapshot().cells[0].color, Color::WHITE);

    event(&mut editor, PointerKind::Click, 15);
    assert_eq!(editor.core().palette.get(15), Some(RED));
    assert_eq!(editor.core().palette.get(0), Some(Color::WHITE));
    assert_eq!(editor.core().selected_cells.as_slice(), &[15]);
    assert_eq!(editor.core().selected_tool, Some(Tool::Select));
    assert!(editor.ui().preview_palette.is_none());
}

#[test]
fn test_move_without_selection_falls_through() {
    let mut editor = editor();
    editor.execute(ToolCommand::Select(Tool::Move)).unwrap();
    event(&mut editor, PointerKind::Click, 6);
    assert_eq!(editor.core().selected_cells.as_slice(), &[6]);
    assert_eq!(editor.core().selected_tool, Some(Tool::Move));
}

#[test]
fn test_rotate_tool_previews_and_commits() {
    let mut editor = editor();
    editor.execute(PaintCommand::PaintCell { cell: 1 }).unwrap();
    editor
        .execute(SelectionCommand::SelectCells {
            cells: [1].into_iter().collect(),
            extend: false,
        })
        .unwrap();
    editor
        .execute(ToolCommand::Select(Tool::RotateLeft90))
        .unwrap();

    // (0,1) rotates left onto (1,3).
    let preview = editor.ui().rotation_preview.clone().unwrap();
    assert_eq!(preview.get(7), Some(RED));
    assert!(editor.snapshot().cells[7].is_previewed);

    event(&mut editor, PointerKind::Click, 0);
    assert_eq!(editor.core().palette.get(7), Some(RED));
    assert_eq!(editor.core().palette.get(1), Some(Color::WHITE));
    assert_eq!(editor.core().selected_tool, Some(Tool::Select));
    assert!(editor.ui().rotation_preview.is_none());
}

#[test]
fn test_header_hover_previews_line_paste() {
    let mut editor = editor();
    editor.execute(PaintCommand::FillLine(Line::Column(0))).unwrap();
    editor
        .execute(palette_core::GridCommand::CopyLine(Line::Column(0)))
        .unwrap();
    assert_eq!(editor.hover_line(Line::Column(3)), CommandResult::Success);
    assert_eq!(editor.snapshot().cells[3].color, RED);
    assert_eq!(editor.hover_line(Line::Row(3)), CommandResult::Success);
    assert!(editor.ui().preview_palette.is_none());
}

#[test]
fn test_out_of_range_event_is_rejected() {
    let mut editor = editor();
    let result = editor.pointer(PointerEvent::new(PointerKind::Click, 16, Modifiers::NONE));
    assert!(result.is_err());
    assert_eq!(editor.version(), 1);
}
