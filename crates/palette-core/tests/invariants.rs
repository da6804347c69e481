//! Randomized invariant checks
//!
//! Drives the editor with random events and commands and verifies after every
//! step that:
//! 1. The palette always holds exactly `width * height` cells.
//! 2. Every selected, locked and clipboard index is inside the grid.
//! 3. Locked cells keep their color across every command that keeps the shape.
//!    Move and rotate clear their selected sources regardless of locks, so
//!    locked cells inside the selection are exempt.
//! 4. Undoing every step restores the initial state exactly.
//!
//! Geometry properties (box symmetry, rope connectivity, reshape overlap) are
//! checked on random inputs as well.

use palette_core::geometry::{cells_in_box, cells_in_rope};
use palette_core::{
    Color, Command, CoreState, Dimensions, EditorConfig, GridCommand, GridLayout, Key, KeyEvent,
    Line, LockCommand, Modifiers, PaintCommand, Palette, PaletteEditor, PointerEvent, PointerKind,
    PopEdge, RotateDirection, SelectionCommand, Tool, ToolCommand,
};
use rand::Rng;
use rand::rngs::ThreadRng;

fn random_color(rng: &mut ThreadRng) -> Color {
    Color::rgb(rng.r#gen(), rng.r#gen(), rng.r#gen())
}

fn random_modifiers(rng: &mut ThreadRng) -> Modifiers {
    Modifiers {
        shift: rng.gen_bool(0.3),
        ctrl: rng.gen_bool(0.1),
        meta: false,
    }
}

fn random_line(rng: &mut ThreadRng, core: &CoreState) -> Line {
    let dims = core.dimensions();
    if rng.gen_bool(0.5) {
        Line::Row(rng.gen_range(0..dims.height))
    } else {
        Line::Column(rng.gen_range(0..dims.width))
    }
}

fn random_command(rng: &mut ThreadRng, core: &CoreState) -> Command {
    let cells = core.palette.len();
    let cell = rng.gen_range(0..cells);
    match rng.gen_range(0..16) {
        0 => GridCommand::Resize {
            width: rng.gen_range(1..8),
            height: rng.gen_range(1..8),
        }
        .into(),
        1 => GridCommand::PopSection(match rng.gen_range(0..4) {
            0 => PopEdge::Top,
            1 => PopEdge::Bottom,
            2 => PopEdge::Left,
            _ => PopEdge::Right,
        })
        .into(),
        2 => GridCommand::RemoveLine(random_line(rng, core)).into(),
        3 => GridCommand::CopyLine(random_line(rng, core)).into(),
        4 => GridCommand::PasteLine(random_line(rng, core)).into(),
        5 => GridCommand::TransformLayout(match rng.gen_range(0..3) {
            0 => GridLayout::Horizontal,
            1 => GridLayout::Vertical,
            _ => GridLayout::Square,
        })
        .into(),
        6 => PaintCommand::SetCellColor {
            cell,
            color: random_color(rng),
        }
        .into(),
        7 => PaintCommand::MoveSelectionBy {
            rows: rng.gen_range(-2..=2),
            columns: rng.gen_range(-2..=2),
        }
        .into(),
        8 => PaintCommand::RotateSelection(if rng.gen_bool(0.5) {
            RotateDirection::Left
        } else {
            RotateDirection::Right
        })
        .into(),
        9 => PaintCommand::PasteCells { target: cell }.into(),
        10 => SelectionCommand::Copy.into(),
        11 => LockCommand::Toggle {
            cell,
            shift: rng.gen_bool(0.5),
        }
        .into(),
        12 => LockCommand::LockSelected.into(),
        13 => ToolCommand::SetColor(random_color(rng)).into(),
        14 => ToolCommand::Select(Tool::ALL[rng.gen_range(0..Tool::ALL.len())]).into(),
        _ => PaintCommand::ClearSelected.into(),
    }
}

fn step(rng: &mut ThreadRng, editor: &mut PaletteEditor) {
    let core = editor.core().clone();
    let cell = rng.gen_range(0..core.palette.len());
    match rng.gen_range(0..4) {
        0 => {
            editor.execute(random_command(rng, &core)).unwrap();
        }
        1 => {
            let kind = match rng.gen_range(0..5) {
                0 => PointerKind::Down,
                1 => PointerKind::Move,
                2 => PointerKind::Up,
                3 => PointerKind::Click,
                _ => PointerKind::Leave,
            };
            let modifiers = random_modifiers(rng);
            editor
                .pointer(PointerEvent::new(kind, cell, modifiers))
                .unwrap();
        }
        2 => {
            editor
                .pointer(PointerEvent::new(
                    PointerKind::Click,
                    cell,
                    random_modifiers(rng),
                ))
                .unwrap();
        }
        _ => {
            editor
                .key(KeyEvent::new(Key::Escape, Modifiers::NONE))
                .unwrap();
        }
    }
}

fn check_bounds(core: &CoreState) {
    let dims = core.dimensions();
    let count = dims.width * dims.height;
    assert_eq!(core.palette.len(), count);
    assert!(core.selected_cells.iter().all(|i| i < count));
    assert!(core.locked_cells.iter().all(|i| i < count));
    assert!(core.selected_cell.is_none_or(|i| i < count));
    if let Some(clipboard) = &core.copied_cells {
        assert!(clipboard.indices().iter().all(|i| *i < count));
    }
    if let Some(line) = core.copied_line {
        assert!(line.check(dims).is_ok());
    }
}

#[test]
fn test_random_session_keeps_invariants() {
    let mut rng = rand::thread_rng();
    let mut editor = PaletteEditor::new(EditorConfig {
        width: 5,
        height: 4,
        history_limit: 10_000,
        ..EditorConfig::default()
    });
    let initial = editor.core().clone();

    for _ in 0..2000 {
        let before = editor.core().clone();
        step(&mut rng, &mut editor);
        let after = editor.core();
        check_bounds(after);

        if before.dimensions() == after.dimensions() {
            let exposed = before
                .locked_cells
                .iter()
                .filter(|i| !before.selected_cells.contains(*i));
            for locked in exposed {
                assert_eq!(
                    before.palette.get(locked),
                    after.palette.get(locked),
                    "locked cell {locked} changed"
                );
            }
        }
    }

    while editor.can_undo() {
        editor.undo();
        check_bounds(editor.core());
    }
    assert_eq!(editor.core(), &initial);
}

#[test]
fn test_rotating_four_times_is_identity_on_square_grid() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let mut editor = PaletteEditor::new(EditorConfig {
            width: 6,
            height: 6,
            ..EditorConfig::default()
        });
        for cell in 0..36 {
            editor
                .execute(PaintCommand::SetCellColor {
                    cell,
                    color: random_color(&mut rng),
                })
                .unwrap();
        }
        editor.execute(SelectionCommand::SelectAll).unwrap();
        let before = editor.core().palette.clone();
        let direction = if rng.gen_bool(0.5) {
            RotateDirection::Left
        } else {
            RotateDirection::Right
        };
        for _ in 0..4 {
            editor
                .execute(PaintCommand::RotateSelection(direction))
                .unwrap();
        }
        assert_eq!(editor.core().palette, before);
        assert_eq!(editor.core().selected_cells.len(), 36);
    }
}

fn random_dims(rng: &mut ThreadRng) -> Dimensions {
    Dimensions {
        width: rng.gen_range(1..12),
        height: rng.gen_range(1..12),
    }
}

#[test]
fn test_box_is_symmetric() {
    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let dims = random_dims(&mut rng);
        let a = rng.gen_range(0..dims.cell_count());
        let b = rng.gen_range(0..dims.cell_count());
        let (ra, ca) = dims.row_col(a);
        let (rb, cb) = dims.row_col(b);
        let cells = cells_in_box(a, b, dims);
        assert_eq!(cells, cells_in_box(b, a, dims));
        assert_eq!(
            cells.len(),
            (ra.abs_diff(rb) + 1) * (ca.abs_diff(cb) + 1)
        );
    }
}

#[test]
fn test_rope_is_connected_and_hits_waypoints() {
    let mut rng = rand::thread_rng();
    for _ in 0..300 {
        let dims = random_dims(&mut rng);
        let points: Vec<usize> = (0..rng.gen_range(2..6))
            .map(|_| rng.gen_range(0..dims.cell_count()))
            .collect();
        let cells = cells_in_rope(&points, dims);
        assert!(points.iter().all(|p| cells.contains(*p)));

        // Every visited cell after the first touches an earlier one (8-neighborhood).
        let visited = cells.as_slice();
        for (n, &cell) in visited.iter().enumerate().skip(1) {
            let (row, col) = dims.row_col(cell);
            let touches = visited[..n].iter().any(|&prev| {
                let (pr, pc) = dims.row_col(prev);
                pr.abs_diff(row) <= 1 && pc.abs_diff(col) <= 1
            });
            assert!(touches, "cell {cell} of {points:?} is disconnected");
        }
    }
}

#[test]
fn test_reshape_identity_and_overlap() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let dims = random_dims(&mut rng);
        let cells = (0..dims.cell_count()).map(|_| random_color(&mut rng)).collect();
        let palette = Palette::from_cells(dims, cells).unwrap();
        assert_eq!(palette.reshape(dims, Color::WHITE), palette);

        let target = random_dims(&mut rng);
        let reshaped = palette.reshape(target, Color::WHITE);
        assert_eq!(reshaped.len(), target.cell_count());
        for row in 0..dims.height.min(target.height) {
            for col in 0..dims.width.min(target.width) {
                assert_eq!(
                    reshaped.get(target.index(row, col)),
                    palette.get(dims.index(row, col))
                );
            }
        }
    }
}
