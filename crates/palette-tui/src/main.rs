//! TUI palette editor demo
//!
//! A terminal color-grid editor built on `palette-core`, using crossterm and ratatui.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p palette-tui -- [config.json]
//! ```
//!
//! The optional JSON file is an `EditorConfig` (missing fields use defaults).
//! Set `PALETTE_TUI_LOG=/path/to/file` to write tracing output to a file;
//! `RUST_LOG` controls the filter.
//!
//! # Controls
//!
//! - Mouse: left button clicks and drags over cells, right button cancels the clipboard
//! - Arrow keys: move the cursor (hovering the cell under it)
//! - Space / Enter: click the cursor cell (Shift+Enter for a shift-click)
//! - Tab / Shift+Tab: next / previous tool
//! - `[` / `]`: previous / next paint color
//! - c: copy selection, x: clear selection, a: select all
//! - r / R: copy / paste the cursor row, k / K: copy / paste the cursor column
//! - +/-: grow / shrink the grid
//! - Ctrl+Z / Ctrl+Y: undo / redo
//! - Esc: cancel, q: quit

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use palette_core::{
    Color as CellColor, CommandError, EditorConfig, GridCommand, Key, Line as GridLine,
    Modifiers, PaintCommand, PaletteEditor, PointerEvent, PointerKind, SelectionCommand, Tool,
    ToolCommand,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env, fs,
    io::{self, stdout},
    process,
    sync::Mutex,
    time::Duration,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const SWATCHES: [CellColor; 8] = [
    CellColor::BLACK,
    CellColor::WHITE,
    CellColor::rgb(0xe6, 0x39, 0x46),
    CellColor::rgb(0xf4, 0xa2, 0x61),
    CellColor::rgb(0xe9, 0xc4, 0x6a),
    CellColor::rgb(0x2a, 0x9d, 0x8f),
    CellColor::rgb(0x45, 0x7b, 0x9d),
    CellColor::rgb(0x6d, 0x59, 0x7a),
];

/// Terminal columns per grid cell.
const CELL_WIDTH: u16 = 2;

fn init_logging() {
    let Ok(path) = env::var("PALETTE_TUI_LOG") else {
        return;
    };
    let file = match fs::File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("cannot open log file {path}: {err}");
            return;
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn load_config(path: Option<&str>) -> Result<EditorConfig, String> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|err| format!("{path}: {err}"))?;
    EditorConfig::from_json_str(&text).map_err(|err| format!("{path}: {err}"))
}

fn to_term_color(color: CellColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Black or white, whichever reads better on `color`.
fn contrast(color: CellColor) -> Color {
    let luma = 299 * color.r as u32 + 587 * color.g as u32 + 114 * color.b as u32;
    if luma > 128_000 {
        Color::Black
    } else {
        Color::White
    }
}

fn modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: mods.contains(KeyModifiers::SHIFT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        meta: mods.contains(KeyModifiers::SUPER),
    }
}

struct App {
    editor: PaletteEditor,
    cursor: usize,
    grid_area: Rect,
    status: String,
    should_quit: bool,
}

impl App {
    fn new(config: EditorConfig) -> Self {
        Self {
            editor: PaletteEditor::new(config),
            cursor: 0,
            grid_area: Rect::default(),
            status: String::from("ready"),
            should_quit: false,
        }
    }

    fn report(&mut self, result: Result<palette_core::CommandResult, CommandError>) {
        match result {
            Ok(outcome) => debug!(?outcome, version = self.editor.version(), "handled"),
            Err(err) => {
                warn!(%err, "rejected");
                self.status = err.to_string();
            }
        }
    }

    fn pointer(&mut self, kind: PointerKind, cell: usize, mods: Modifiers) {
        let result = self.editor.pointer(PointerEvent::new(kind, cell, mods));
        self.report(result);
    }

    fn execute(&mut self, command: impl Into<palette_core::Command>) {
        let result = self.editor.execute(command);
        self.report(result);
    }

    fn clamp_cursor(&mut self) {
        let len = self.editor.core().palette.len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn move_cursor(&mut self, rows: isize, cols: isize) {
        let dims = self.editor.core().dimensions();
        let (row, col) = dims.row_col(self.cursor);
        if let Some(next) = dims.checked_index(row as isize + rows, col as isize + cols) {
            self.cursor = next;
            self.pointer(PointerKind::Move, next, Modifiers::NONE);
        }
    }

    fn cycle_tool(&mut self, step: isize) {
        let current = self.editor.core().selected_tool.unwrap_or(Tool::Paint);
        let index = Tool::ALL.iter().position(|t| *t == current).unwrap_or(0) as isize;
        let len = Tool::ALL.len() as isize;
        let next = Tool::ALL[(index + step).rem_euclid(len) as usize];
        self.execute(ToolCommand::Select(next));
        self.status = format!("tool: {next}");
    }

    fn cycle_color(&mut self, step: isize) {
        let current = self.editor.core().selected_color;
        let index = SWATCHES.iter().position(|c| *c == current).unwrap_or(0) as isize;
        let next = SWATCHES[(index + step).rem_euclid(SWATCHES.len() as isize) as usize];
        self.execute(ToolCommand::SetColor(next));
        self.status = format!("color: {next}");
    }

    fn resize_grid(&mut self, delta: isize) {
        let dims = self.editor.core().dimensions();
        let width = (dims.width as isize + delta).max(1) as usize;
        let height = (dims.height as isize + delta).max(1) as usize;
        self.execute(GridCommand::Resize { width, height });
        self.clamp_cursor();
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let mods = modifiers(key.modifiers);
        let dims = self.editor.core().dimensions();
        let (row, col) = dims.row_col(self.cursor);

        match key.code {
            KeyCode::Char('q') if !mods.command() => self.should_quit = true,
            KeyCode::Char(c) if mods.command() => {
                let result = self
                    .editor
                    .key(palette_core::KeyEvent::new(Key::Char(c), mods));
                self.report(result);
                self.clamp_cursor();
            }
            KeyCode::Esc => {
                let result = self
                    .editor
                    .key(palette_core::KeyEvent::new(Key::Escape, mods));
                self.report(result);
                self.status = String::from("cancelled");
            }
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.pointer(PointerKind::Click, self.cursor, mods)
            }
            KeyCode::Tab => self.cycle_tool(1),
            KeyCode::BackTab => self.cycle_tool(-1),
            KeyCode::Char('[') => self.cycle_color(-1),
            KeyCode::Char(']') => self.cycle_color(1),
            KeyCode::Char('c') => self.execute(SelectionCommand::Copy),
            KeyCode::Char('x') => self.execute(PaintCommand::ClearSelected),
            KeyCode::Char('a') => self.execute(SelectionCommand::SelectAll),
            KeyCode::Char('r') => self.execute(GridCommand::CopyLine(GridLine::Row(row))),
            KeyCode::Char('R') => self.execute(GridCommand::PasteLine(GridLine::Row(row))),
            KeyCode::Char('k') => self.execute(GridCommand::CopyLine(GridLine::Column(col))),
            KeyCode::Char('K') => self.execute(GridCommand::PasteLine(GridLine::Column(col))),
            KeyCode::Char('+') => self.resize_grid(1),
            KeyCode::Char('-') => self.resize_grid(-1),
            _ => {}
        }
    }

    fn cell_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.grid_area;
        if column < area.x || row < area.y {
            return None;
        }
        let col = ((column - area.x) / CELL_WIDTH) as isize;
        let row = (row - area.y) as isize;
        self.editor.core().dimensions().checked_index(row, col)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let mods = modifiers(mouse.modifiers);
        let Some(cell) = self.cell_at(mouse.column, mouse.row) else {
            let event = match mouse.kind {
                MouseEventKind::Moved => PointerEvent::new(PointerKind::Leave, self.cursor, mods),
                MouseEventKind::Up(MouseButton::Left) => PointerEvent::released_outside(mods),
                _ => return,
            };
            let result = self.editor.pointer(event);
            self.report(result);
            return;
        };
        self.cursor = cell;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer(PointerKind::Down, cell, mods),
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                self.pointer(PointerKind::Move, cell, mods)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                // Terminals report no separate click: release completes one.
                self.pointer(PointerKind::Up, cell, mods);
                self.pointer(PointerKind::Click, cell, mods);
            }
            MouseEventKind::Down(MouseButton::Right) => {
                let result = self.editor.context_menu();
                self.report(result);
            }
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(34)])
            .split(frame.area());

        let snapshot = self.editor.snapshot();
        let grid_block = Block::default().borders(Borders::ALL).title(format!(
            " palette {}x{} ",
            snapshot.dimensions.width, snapshot.dimensions.height
        ));
        self.grid_area = grid_block.inner(chunks[0]);

        let lines: Vec<Line> = (0..snapshot.dimensions.height)
            .map(|row| {
                let spans: Vec<Span> = snapshot
                    .row(row)
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| {
                        let index = snapshot.dimensions.index(row, col);
                        let text = match (index == self.cursor, cell.is_locked, cell.is_selected) {
                            (true, _, _) => "<>",
                            (false, true, true) => "#*",
                            (false, true, false) => "##",
                            (false, false, true) => "**",
                            (false, false, false) => "  ",
                        };
                        let mut style = Style::default()
                            .bg(to_term_color(cell.color))
                            .fg(contrast(cell.color));
                        if cell.is_previewed {
                            style = style.add_modifier(Modifier::DIM);
                        }
                        Span::styled(text, style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).block(grid_block), chunks[0]);

        let core = self.editor.core();
        let tool = core
            .selected_tool
            .map(|t| t.to_string())
            .unwrap_or_else(|| String::from("(none)"));
        let clipboard = match (&core.copied_cells, core.copied_line) {
            (Some(cells), _) => format!("{} cells", cells.len()),
            (None, Some(GridLine::Row(r))) => format!("row {r}"),
            (None, Some(GridLine::Column(c))) => format!("column {c}"),
            (None, None) => String::from("empty"),
        };
        let info = vec![
            Line::from(vec![
                Span::raw("color  "),
                Span::styled("    ", Style::default().bg(to_term_color(core.selected_color))),
                Span::raw(format!(" {}", core.selected_color)),
            ]),
            Line::from(format!("tool   {tool}")),
            Line::from(format!("cursor {}", self.cursor)),
            Line::from(format!("sel    {} cells", core.selected_cells.len())),
            Line::from(format!("locked {} cells", core.locked_cells.len())),
            Line::from(format!("clip   {clipboard}")),
            Line::from(format!(
                "undo   {} / redo {}",
                self.editor.undo_depth(),
                self.editor.redo_depth()
            )),
            Line::from(format!("ver    {}", self.editor.version())),
            Line::from(""),
            Line::from(Span::styled(
                self.status.clone(),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(""),
            Line::from("Tab tool  [ ] color  q quit"),
            Line::from("Space click  Esc cancel"),
            Line::from("c copy  x clear  a all"),
            Line::from("r/R row  k/K column  +/- size"),
        ];
        frame.render_widget(
            Paragraph::new(info).block(Block::default().borders(Borders::ALL).title(" state ")),
            chunks[1],
        );
    }
}

fn main() -> io::Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let config = match load_config(args.get(1).map(String::as_str)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid config: {err}");
            process::exit(1);
        }
    };

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Mouse(mouse) => app.handle_mouse_event(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}
