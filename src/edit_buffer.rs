/// Single-line text input with a character cap.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    chars: Vec<char>,
    cursor: usize,
    limit: usize,
}

impl EditBuffer {
    /// Starts with `text` (truncated to `limit`) and the cursor at the end.
    pub fn new(text: &str, limit: usize) -> Self {
        let chars: Vec<char> = text.chars().filter(|c| *c != '\n').take(limit).collect();
        let cursor = chars.len();
        Self {
            chars,
            cursor,
            limit,
        }
    }

    pub fn empty(limit: usize) -> Self {
        Self::new("", limit)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_full(&self) -> bool {
        self.chars.len() >= self.limit
    }

    /// Returns false when the buffer is full and the character was dropped.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.is_full() || ch == '\n' {
            return false;
        }
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
        true
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    /// Deletes from the cursor back to the start of the previous word.
    pub fn delete_word_back(&mut self) {
        let end = self.cursor;
        self.move_word_left();
        self.chars.drain(self.cursor..end);
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    pub fn move_word_left(&mut self) {
        while self.cursor > 0 && self.chars[self.cursor - 1].is_whitespace() {
            self.cursor -= 1;
        }
        while self.cursor > 0 && !self.chars[self.cursor - 1].is_whitespace() {
            self.cursor -= 1;
        }
    }

    pub fn move_word_right(&mut self) {
        let len = self.chars.len();
        while self.cursor < len && !self.chars[self.cursor].is_whitespace() {
            self.cursor += 1;
        }
        while self.cursor < len && self.chars[self.cursor].is_whitespace() {
            self.cursor += 1;
        }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Text split around the cursor, for rendering a caret.
    pub fn split_at_cursor(&self) -> (String, String) {
        (
            self.chars[..self.cursor].iter().collect(),
            self.chars[self.cursor..].iter().collect(),
        )
    }
}
