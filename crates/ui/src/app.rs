//! Main TUI application state and logic

use crate::editor::Key;
use crate::scratchpad::Scratchpad;
use crate::theme::UiTheme;
use crate::view;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::info;

/// Which pane receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Editor,
    Console,
}

impl FocusedPane {
    pub fn toggle(self) -> Self {
        match self {
            FocusedPane::Editor => FocusedPane::Console,
            FocusedPane::Console => FocusedPane::Editor,
        }
    }
}

/// The main application state
pub struct App {
    pub scratchpad: Scratchpad,
    pub theme: UiTheme,
    pub focused_pane: FocusedPane,
    /// Console scroll offset; `usize::MAX` follows the tail.
    pub console_scroll: usize,
    pub editor_scroll: usize,
    pub should_quit: bool,
    pub status_message: String,
}

impl App {
    pub fn new(scratchpad: Scratchpad, theme: UiTheme) -> Self {
        App {
            scratchpad,
            theme,
            focused_pane: FocusedPane::Editor,
            console_scroll: 0,
            editor_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key);
                    }
                    Event::Paste(text) if self.focused_pane == FocusedPane::Editor => {
                        self.scratchpad.editor_mut().paste(&text);
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        view::render_header(frame, rows[0], &self.theme);
        view::render_editor(
            frame,
            columns[0],
            self.scratchpad.editor(),
            &self.theme,
            self.focused_pane == FocusedPane::Editor,
            &mut self.editor_scroll,
        );
        view::render_console(
            frame,
            columns[1],
            self.scratchpad.output(),
            &self.theme,
            self.focused_pane == FocusedPane::Console,
            &mut self.console_scroll,
        );
        view::render_status_bar(
            frame,
            rows[2],
            &self.status_message,
            self.scratchpad.executor_name(),
            &self.theme,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => self.run_source(),
            KeyCode::F(5) => self.run_source(),
            KeyCode::Char('l') if ctrl => self.clear_all(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.toggle();
            }
            _ => match self.focused_pane {
                FocusedPane::Editor => self.handle_editor_key(key, ctrl),
                FocusedPane::Console => self.handle_console_key(key),
            },
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent, ctrl: bool) {
        let key = match key.code {
            KeyCode::Char(c) if !ctrl => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => return,
        };
        self.scratchpad.editor_mut().on_key(key);
    }

    fn handle_console_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.console_scroll = self.console_scroll.saturating_sub(1),
            KeyCode::Down => self.console_scroll = self.console_scroll.saturating_add(1),
            KeyCode::PageUp => self.console_scroll = self.console_scroll.saturating_sub(10),
            KeyCode::PageDown => self.console_scroll = self.console_scroll.saturating_add(10),
            KeyCode::Home => self.console_scroll = 0,
            KeyCode::End => self.console_scroll = usize::MAX,
            _ => {}
        }
    }

    /// Execute the editor contents.
    pub fn run_source(&mut self) {
        let summary = self.scratchpad.run();
        self.console_scroll = usize::MAX;
        self.status_message = if summary.failed {
            format!("Run failed ({} line(s))", summary.captured)
        } else {
            format!("Run finished ({} line(s))", summary.captured)
        };
        info!(captured = summary.captured, failed = summary.failed, "run triggered");
    }

    /// Clear the editor and the console.
    pub fn clear_all(&mut self) {
        self.scratchpad.clear();
        self.console_scroll = 0;
        self.editor_scroll = 0;
        self.status_message = "Cleared".to_string();
    }
}
