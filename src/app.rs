use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use tableblock::data::CellData;
use tableblock::geometry::PointerEvent;
use tableblock::plugin::{Setting, TableBlock};
use tableblock::{CellPosition, ClickTarget, HostContext, Key, KeyInput};

use crate::fileio::FileIO;
use crate::ui::{self, Hit, HitMap};

/// What `save` would write, used to tell whether an edit changed anything
type Snapshot = (Vec<Vec<CellData>>, bool, bool);

pub struct App {
    pub block: TableBlock,
    pub host: Rc<HostContext>,
    pub file_io: FileIO,
    pub dirty: bool,
    pub message: Option<String>,
    pub should_quit: bool,
    quit_requested: bool,
    hits: HitMap,
}

impl App {
    pub fn new(block: TableBlock, host: Rc<HostContext>, file_io: FileIO) -> Self {
        Self {
            block,
            host,
            file_io,
            dirty: false,
            message: None,
            should_quit: false,
            quit_requested: false,
            hits: HitMap::default(),
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        while !self.should_quit {
            let frame = ui::layout_frame(terminal.size()?, self.block.is_stretched());
            if self.block.engine().frame() != frame {
                self.block.engine_mut().set_frame(frame);
            }

            let mut hits = HitMap::default();
            terminal.draw(|f| hits = ui::render(f, self))?;
            self.hits = hits;

            if poll(Duration::from_millis(16))? {
                let before = self.snapshot();
                match event::read()? {
                    Event::Key(key) => {
                        self.message = None;
                        self.handle_key(key);
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Paste(text) => self.handle_paste(&text),
                    _ => {}
                }
                if self.snapshot() != before {
                    self.dirty = true;
                }
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        let engine = self.block.engine();
        (engine.get_data(), engine.with_headings(), self.block.is_stretched())
    }

    // === Mouse ===

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let pointer = PointerEvent::at(f64::from(mouse.column) + 0.5, f64::from(mouse.row) + 0.5);
                self.block.engine_mut().pointer_moved(pointer, Instant::now());
            }
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            _ => {}
        }
    }

    fn click(&mut self, x: u16, y: u16) {
        match self.hits.hit(x, y) {
            Some(Hit::MenuItem(axis, index)) => {
                self.block.engine_mut().menu_item_clicked(axis, index);
                self.document_click(ClickTarget::Wrapper);
            }
            Some(Hit::Swatch(color)) => {
                self.block.engine_mut().pick_color(&color);
                self.document_click(ClickTarget::Wrapper);
            }
            Some(Hit::Toggler(axis)) => {
                self.block.engine_mut().toggler_clicked(axis);
                self.document_click(ClickTarget::Wrapper);
            }
            Some(Hit::AddRow) => self.document_click(ClickTarget::AddRowButton),
            Some(Hit::AddColumn) => self.document_click(ClickTarget::AddColumnButton),
            None => {
                let cell = self
                    .block
                    .engine()
                    .layout()
                    .cell_at(f64::from(x) + 0.5, f64::from(y) + 0.5);
                match cell {
                    Some((r, c)) => {
                        self.block.engine_mut().focus_in(r + 1, c + 1);
                        self.document_click(ClickTarget::Table);
                    }
                    None => self.document_click(ClickTarget::Outside),
                }
            }
        }
    }

    /// Deliver a click the way the document-level listener would: only
    /// while the engine's subscription is live
    fn document_click(&mut self, target: ClickTarget) {
        let Some(id) = self.block.engine().listener() else {
            return;
        };
        if self.host.is_listening(id) {
            self.block.engine_mut().document_clicked(target);
        }
    }

    // === Keyboard ===

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if ctrl {
            match key.code {
                KeyCode::Char('s') => self.save(),
                KeyCode::Char('q') => self.quit(),
                KeyCode::Char('h') => {
                    let setting = if self.block.engine().with_headings() {
                        Setting::WithoutHeadings
                    } else {
                        Setting::WithHeadings
                    };
                    self.block.activate_setting(setting);
                }
                KeyCode::Char('t') => self.block.activate_setting(Setting::ToggleStretch),
                _ => {}
            }
            return;
        }
        self.quit_requested = false;

        match key.code {
            KeyCode::Esc => self.document_click(ClickTarget::Outside),
            KeyCode::Enter => {
                let input = KeyInput { key: Key::Enter, shift };
                let outcome = self.block.engine_mut().handle_key(input);
                if !outcome.prevent_default {
                    self.edit_focused(|content| content.push_str("<br>"));
                }
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.block.engine_mut().handle_key(KeyInput::new(Key::Tab));
                self.move_focus(if key.code == KeyCode::BackTab { -1 } else { 1 });
            }
            KeyCode::Char(c) => {
                self.block.engine_mut().handle_key(KeyInput { key: Key::Char(c), shift });
                self.edit_focused(|content| push_escaped(content, c));
            }
            KeyCode::Backspace => self.edit_focused(pop_glyph),
            KeyCode::Up => self.move_focus_by(-1, 0),
            KeyCode::Down => self.move_focus_by(1, 0),
            KeyCode::Left => self.move_focus_by(0, -1),
            KeyCode::Right => self.move_focus_by(0, 1),
            _ => {
                self.block.engine_mut().handle_key(KeyInput::new(Key::Other));
            }
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let engine = self.block.engine_mut();
        if engine.is_read_only() {
            return;
        }
        let CellPosition { row, column } = engine.focused_cell();
        let Some(mut content) = engine.cell_content(row, column).map(str::to_string) else {
            return;
        };
        edit(&mut content);
        engine.set_cell_content(row, column, content);
    }

    /// Step through cells in reading order
    fn move_focus(&mut self, step: isize) {
        let engine = self.block.engine();
        let cols = engine.number_of_columns() as isize;
        let cells = engine.number_of_rows() as isize * cols;
        let focused = engine.focused_cell();
        let next = if focused.is_none() {
            0
        } else {
            ((focused.row as isize - 1) * cols + focused.column as isize - 1 + step).rem_euclid(cells.max(1))
        };
        self.focus((next / cols.max(1)) as usize + 1, (next % cols.max(1)) as usize + 1);
    }

    fn move_focus_by(&mut self, rows: isize, cols: isize) {
        let focused = self.block.engine().focused_cell();
        if focused.is_none() {
            self.focus(1, 1);
            return;
        }
        let row = focused.row.saturating_add_signed(rows).max(1);
        let column = focused.column.saturating_add_signed(cols).max(1);
        self.focus(row, column);
    }

    fn focus(&mut self, row: usize, column: usize) {
        self.block.engine_mut().focus_in(row, column);
    }

    fn handle_paste(&mut self, text: &str) {
        let lower = text.to_ascii_lowercase();
        let is_table = TableBlock::paste_tags()
            .iter()
            .any(|tag| lower.contains(&format!("<{}", tag.to_ascii_lowercase())));

        if !is_table {
            self.edit_focused(|content| text.chars().for_each(|c| push_escaped(content, c)));
            return;
        }

        match self.block.on_paste(text) {
            Ok(()) => {
                self.message = Some(format!(
                    "Pasted {}x{} table",
                    self.block.engine().number_of_rows(),
                    self.block.engine().number_of_columns()
                ));
            }
            Err(e) => self.message = Some(format!("Paste failed: {}", e)),
        }
    }

    // === File ===

    fn save(&mut self) {
        let data = self.block.save();
        match self.file_io.write(&data) {
            Ok(()) => {
                self.dirty = false;
                self.message = Some(format!("Saved to {}", self.file_io.file_name()));
            }
            Err(e) => self.message = Some(format!("Error saving: {}", e)),
        }
    }

    fn quit(&mut self) {
        if self.dirty && !self.quit_requested {
            self.quit_requested = true;
            self.message = Some("Unsaved changes! Press Ctrl+Q again to quit".to_string());
            return;
        }
        debug!("quitting");
        self.block.destroy();
        self.should_quit = true;
    }
}

/// Type one character into a cell's inner HTML
fn push_escaped(content: &mut String, c: char) {
    match c {
        '<' => content.push_str("&lt;"),
        '>' => content.push_str("&gt;"),
        '&' => content.push_str("&amp;"),
        _ => content.push(c),
    }
}

/// Remove the last visible character, or the trailing tag or entity
fn pop_glyph(content: &mut String) {
    let cut = if content.ends_with('>') {
        content.rfind('<')
    } else if content.ends_with(';') {
        content.rfind('&').filter(|&i| {
            let entity = &content[i + 1..content.len() - 1];
            !entity.is_empty() && entity.chars().all(|c| c.is_ascii_alphanumeric() || c == '#')
        })
    } else {
        None
    };

    match cut {
        Some(i) => content.truncate(i),
        None => {
            content.pop();
        }
    }
}
