//! State management example
//!
//! Demonstrates how to drive `PaletteEditor` with events and listen to state changes.

use palette_core::{
    Color, GridCommand, GridSnapshot, Key, KeyEvent, Modifiers, PaletteEditor, PointerEvent,
    PointerKind, Tool, ToolCommand,
};
use std::sync::{Arc, Mutex};

fn print_grid(snapshot: &GridSnapshot) {
    for row in 0..snapshot.dimensions.height {
        let line: String = snapshot
            .row(row)
            .iter()
            .map(|cell| match (cell.is_locked, cell.is_selected) {
                (true, _) => 'L',
                (false, true) => '*',
                _ if cell.color == Color::WHITE => '.',
                _ => '#',
            })
            .collect();
        println!("  {line}");
    }
}

fn click(editor: &mut PaletteEditor, cell: usize, modifiers: Modifiers) {
    if let Err(err) = editor.pointer(PointerEvent::new(PointerKind::Click, cell, modifiers)) {
        println!("  click rejected: {err}");
    }
}

fn main() {
    println!("=== Palette editor state management ===\n");

    let mut editor = PaletteEditor::default();
    editor
        .execute(GridCommand::Resize {
            width: 6,
            height: 4,
        })
        .unwrap();

    let change_count = Arc::new(Mutex::new(0));
    let change_count_clone = change_count.clone();
    editor.subscribe(move |change| {
        let mut count = change_count_clone.lock().unwrap();
        *count += 1;
        println!(
            "  change #{}: {:?} (version: {} -> {})",
            count, change.change_type, change.old_version, change.new_version
        );
    });

    println!("1. Paint a diagonal:");
    for cell in [0, 7, 14, 21] {
        click(&mut editor, cell, Modifiers::NONE);
    }
    print_grid(&editor.snapshot());

    println!("\n2. Lock the top-left cell, then try to paint over it:");
    editor.execute(ToolCommand::Select(Tool::Lock)).unwrap();
    click(&mut editor, 0, Modifiers::NONE);
    editor.execute(ToolCommand::Select(Tool::FillAll)).unwrap();
    print_grid(&editor.snapshot());

    println!("\n3. Undo the fill with Ctrl+Z:");
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::default()
    };
    editor.key(KeyEvent::new(Key::Char('z'), ctrl)).unwrap();
    print_grid(&editor.snapshot());

    println!("\n4. Select a row:");
    editor.execute(ToolCommand::Select(Tool::RowSelect)).unwrap();
    click(&mut editor, 8, Modifiers::NONE);
    print_grid(&editor.snapshot());

    println!("\n5. Out-of-range click:");
    click(&mut editor, 99, Modifiers::NONE);

    println!(
        "\nversion = {}, undo depth = {}, redo depth = {}",
        editor.version(),
        editor.undo_depth(),
        editor.redo_depth()
    );
}
