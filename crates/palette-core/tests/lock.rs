use palette_core::{
    Color, EditorConfig, GridCommand, Line, LockCommand, Modifiers, PaintCommand, PaletteEditor,
    PointerEvent, PointerKind, RotateDirection, SelectionCommand, Tool, ToolCommand,
};
use pretty_assertions::assert_eq;

const RED: Color = Color::rgb(255, 0, 0);

fn editor() -> PaletteEditor {
    let mut editor = PaletteEditor::new(EditorConfig {
        width: 3,
        height: 3,
        ..EditorConfig::default()
    });
    editor.execute(ToolCommand::SetColor(RED)).unwrap();
    editor
}

fn click(editor: &mut PaletteEditor, cell: usize, modifiers: Modifiers) {
    editor
        .pointer(PointerEvent::new(PointerKind::Click, cell, modifiers))
        .unwrap();
}

fn locked(editor: &PaletteEditor) -> Vec<usize> {
    editor.core().locked_cells.as_slice().to_vec()
}

#[test]
fn test_lock_tool_click_semantics() {
    let mut editor = editor();
    editor.execute(ToolCommand::Select(Tool::Lock)).unwrap();

    click(&mut editor, 0, Modifiers::NONE);
    assert_eq!(locked(&editor), vec![0]);
    click(&mut editor, 1, Modifiers::NONE);
    assert_eq!(locked(&editor), vec![1]);
    click(&mut editor, 2, Modifiers::SHIFT);
    assert_eq!(locked(&editor), vec![1, 2]);
    click(&mut editor, 1, Modifiers::SHIFT);
    assert_eq!(locked(&editor), vec![2]);
    click(&mut editor, 4, Modifiers::SHIFT);
    click(&mut editor, 2, Modifiers::NONE);
    assert!(locked(&editor).is_empty());
}

#[test]
fn test_box_lock_drag() {
    let mut editor = editor();
    editor.execute(ToolCommand::Select(Tool::BoxLock)).unwrap();
    for (kind, cell) in [
        (PointerKind::Down, 4),
        (PointerKind::Move, 8),
        (PointerKind::Up, 8),
    ] {
        editor
            .pointer(PointerEvent::new(kind, cell, Modifiers::NONE))
            .unwrap();
    }
    assert_eq!(locked(&editor), vec![4, 5, 7, 8]);
    assert!(!editor.ui().is_locking());
}

#[test]
fn test_rope_lock_shows_temp_cells() {
    let mut editor = editor();
    editor.execute(ToolCommand::Select(Tool::RopeLock)).unwrap();
    editor
        .pointer(PointerEvent::new(PointerKind::Down, 0, Modifiers::NONE))
        .unwrap();
    editor
        .pointer(PointerEvent::new(PointerKind::Move, 8, Modifiers::NONE))
        .unwrap();
    assert!(editor.ui().is_locking());
    assert_eq!(editor.ui().lock_start(), None);
    assert_eq!(editor.ui().lock_rope_points(), &[0, 8]);
    assert_eq!(editor.ui().temp_locked_cells(), &[0, 4, 8]);
    assert!(editor.snapshot().cells[4].is_locked);
    assert!(locked(&editor).is_empty());
}

#[test]
fn test_locked_cells_survive_every_write() {
    let mut editor = editor();
    editor.execute(SelectionCommand::SelectAll).unwrap();
    editor.execute(LockCommand::LockSelected).unwrap();
    let before = editor.core().palette.clone();

    let writes: Vec<palette_core::Command> = vec![
        PaintCommand::PaintCell { cell: 4 }.into(),
        PaintCommand::SetCellColor { cell: 4, color: RED }.into(),
        PaintCommand::FillAll.into(),
        PaintCommand::FillSelected.into(),
        PaintCommand::FillLine(Line::Row(1)).into(),
        PaintCommand::SetSelectedColor(RED).into(),
        PaintCommand::ClearSelected.into(),
        GridCommand::ClearLine(Line::Column(0)).into(),
    ];
    for write in writes {
        editor.execute(write).unwrap();
        assert_eq!(editor.core().palette, before);
    }
}

#[test]
fn test_move_and_rotate_skip_locked_destinations() {
    let mut editor = editor();
    editor.execute(PaintCommand::PaintCell { cell: 0 }).unwrap();
    editor
        .execute(LockCommand::Toggle {
            cell: 2,
            shift: false,
        })
        .unwrap();
    editor
        .execute(SelectionCommand::Click {
            cell: 0,
            shift: false,
        })
        .unwrap();
    editor
        .execute(PaintCommand::MoveSelectionBy {
            rows: 0,
            columns: 2,
        })
        .unwrap();
    // Source cleared, locked destination untouched.
    assert_eq!(editor.core().palette.get(0), Some(Color::WHITE));
    assert_eq!(editor.core().palette.get(2), Some(Color::WHITE));

    editor.undo();
    editor
        .execute(PaintCommand::RotateSelection(RotateDirection::Right))
        .unwrap();
    // (0,0) rotates right onto (2,0).
    assert_eq!(editor.core().palette.get(6), Some(RED));
    assert_eq!(editor.core().selected_cells.as_slice(), &[6]);
}

#[test]
fn test_unlock_selected_and_unlock_all() {
    let mut editor = editor();
    editor.execute(LockCommand::LockAll).unwrap();
    editor
        .execute(SelectionCommand::SelectLine {
            line: Line::Row(0),
            modifiers: Modifiers::NONE,
        })
        .unwrap();
    editor.execute(ToolCommand::Select(Tool::UnlockSelected)).unwrap();
    assert_eq!(locked(&editor), vec![3, 4, 5, 6, 7, 8]);
    assert_eq!(editor.core().selected_tool, Some(Tool::Paint));

    editor.execute(ToolCommand::Select(Tool::UnlockAll)).unwrap();
    assert!(locked(&editor).is_empty());
}
