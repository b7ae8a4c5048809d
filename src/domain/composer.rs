//! The in-progress outbound message (and the join form's name field).

/// Longest draft the composer accepts, in characters.
const MAX_DRAFT_LENGTH: usize = 4096;

/// Editable text with a character-indexed cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposerDraft {
    text: String,
    /// Cursor position as a character index, not a byte offset.
    cursor: usize,
}

impl ComposerDraft {
    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the trimmed text has content, i.e. it could be sent.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Replaces the whole text verbatim and moves the cursor to the end.
    /// Returns false, leaving the draft as it was, when `value` is too long.
    pub fn set_text(&mut self, value: &str) -> bool {
        let len = value.chars().count();
        if len > MAX_DRAFT_LENGTH {
            return false;
        }
        self.text = value.to_owned();
        self.cursor = len;
        true
    }

    /// Inserts `ch` at the cursor. Returns false when the draft is full.
    pub fn insert(&mut self, ch: char) -> bool {
        if self.text.chars().count() >= MAX_DRAFT_LENGTH {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
        true
    }

    /// Removes the character before the cursor. Returns true if one was removed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.remove_at_cursor();
        true
    }

    /// Removes the character under the cursor. Returns true if one was removed.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        self.remove_at_cursor();
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Text before the cursor, used to place the terminal cursor.
    pub fn text_before_cursor(&self) -> &str {
        &self.text[..self.byte_offset(self.cursor)]
    }

    pub fn text_after_cursor(&self) -> &str {
        &self.text[self.byte_offset(self.cursor)..]
    }

    fn remove_at_cursor(&mut self) {
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.text.drain(start..end);
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}
