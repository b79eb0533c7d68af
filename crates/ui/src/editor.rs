//! Editable source buffer.

/// Multi-line text buffer with a cursor.
///
/// The cursor is a byte offset that always sits on a char boundary.
pub struct Editor {
    /// Source text.
    text: String,
    /// Cursor position.
    cursor: usize,
    /// Column kept across vertical moves.
    preferred_column: Option<usize>,
}

impl Editor {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            preferred_column: None,
        }
    }

    /// Create an editor holding `text`, cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let mut editor = Self::new();
        editor.set_text(text);
        editor
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole buffer and move the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
        self.preferred_column = None;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.preferred_column = None;
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor byte offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor as (row, column), both counted in chars from zero.
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let row = before.matches('\n').count();
        let col = before[self.line_start(self.cursor)..].chars().count();
        (row, col)
    }

    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// Handle key input. Returns whether the text changed.
    pub fn on_key(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) => {
                self.insert_char(c);
                true
            }
            Key::Enter => {
                self.insert_char('\n');
                true
            }
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete(),
            Key::Left => {
                self.move_left();
                false
            }
            Key::Right => {
                self.move_right();
                false
            }
            Key::Up => {
                self.move_up();
                false
            }
            Key::Down => {
                self.move_down();
                false
            }
            Key::Home => {
                self.cursor = self.line_start(self.cursor);
                self.preferred_column = None;
                false
            }
            Key::End => {
                self.cursor = self.line_end(self.cursor);
                self.preferred_column = None;
                false
            }
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.preferred_column = None;
    }

    /// Handle paste.
    pub fn paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n");
        self.text.insert_str(self.cursor, &text);
        self.cursor += text.len();
        self.preferred_column = None;
    }

    pub fn backspace(&mut self) -> bool {
        self.preferred_column = None;
        match self.prev_boundary() {
            Some(prev) => {
                self.text.replace_range(prev..self.cursor, "");
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self) -> bool {
        self.preferred_column = None;
        match self.next_boundary() {
            Some(next) => {
                self.text.replace_range(self.cursor..next, "");
                true
            }
            None => false,
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
        self.preferred_column = None;
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
        self.preferred_column = None;
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let column = self.column();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, start - 1, column);
        self.preferred_column = Some(column);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end == self.text.len() {
            self.cursor = end;
            return;
        }
        let column = self.column();
        let next_start = end + 1;
        let next_end = self.line_end(next_start);
        self.cursor = self.offset_in_line(next_start, next_end, column);
        self.preferred_column = Some(column);
    }

    fn column(&self) -> usize {
        self.preferred_column
            .unwrap_or_else(|| self.text[self.line_start(self.cursor)..self.cursor].chars().count())
    }

    fn line_start(&self, pos: usize) -> usize {
        self.text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.text[pos..].find('\n').map(|i| pos + i).unwrap_or(self.text.len())
    }

    /// Byte offset of `column` within the line `start..end`, clamped to its end.
    fn offset_in_line(&self, start: usize, end: usize, column: usize) -> usize {
        self.text[start..end]
            .char_indices()
            .nth(column)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .chars()
            .next_back()
            .map(|c| self.cursor - c.len_utf8())
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

/// Key input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}
