/// Uncommitted text with a byte-offset cursor that always sits on a char
/// boundary. Used for both the composer and the rename editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub cursor: usize,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns the text and leaves the draft empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Text split at the cursor, for rendering.
    pub fn split(&self) -> (&str, &str) {
        self.text.split_at(self.cursor)
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn delete_word_backward(&mut self) {
        let start = self.previous_word_start();
        if start < self.cursor {
            self.text.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    pub fn move_to_previous_word(&mut self) {
        self.cursor = self.previous_word_start();
    }

    pub fn move_to_next_word(&mut self) {
        let rest = &self.text[self.cursor..];
        // Skip the rest of the current word, then the whitespace after it.
        let word_end = rest
            .char_indices()
            .find(|(_, ch)| ch.is_whitespace())
            .map_or(rest.len(), |(i, _)| i);
        let next_start = rest[word_end..]
            .char_indices()
            .find(|(_, ch)| !ch.is_whitespace())
            .map_or(rest.len(), |(i, _)| word_end + i);
        self.cursor += next_start;
    }

    fn previous_word_start(&self) -> usize {
        let before = &self.text[..self.cursor];
        let trimmed = before.trim_end();
        trimmed
            .char_indices()
            .rev()
            .find(|(_, ch)| ch.is_whitespace())
            .map_or(0, |(i, ch)| i + ch.len_utf8())
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|ch| self.cursor + ch.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_places_cursor_at_end() {
        let draft = Draft::from_text("hello");
        assert_eq!(draft.cursor, 5);
        assert_eq!(draft.split(), ("hello", ""));
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut draft = Draft::new();
        draft.insert_char('a');
        draft.insert_char('b');
        draft.insert_char('c');
        assert_eq!(draft.text, "abc");

        draft.backspace();
        assert_eq!(draft.text, "ab");
        assert_eq!(draft.cursor, 2);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut draft = Draft::from_text("abc");
        draft.move_cursor_home();
        draft.backspace();
        assert_eq!(draft.text, "abc");
        assert_eq!(draft.cursor, 0);
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut draft = Draft::from_text("abc");
        draft.move_cursor_home();
        draft.delete();
        assert_eq!(draft.text, "bc");
        draft.move_cursor_end();
        draft.delete();
        assert_eq!(draft.text, "bc");
    }

    #[test]
    fn test_multibyte_cursor_movement() {
        let mut draft = Draft::from_text("aé☑");
        draft.move_cursor_left();
        assert_eq!(draft.split(), ("aé", "☑"));
        draft.move_cursor_left();
        assert_eq!(draft.split(), ("a", "é☑"));
        draft.move_cursor_right();
        assert_eq!(draft.split(), ("aé", "☑"));

        draft.backspace();
        assert_eq!(draft.text, "a☑");
        draft.delete();
        assert_eq!(draft.text, "a");
    }

    #[test]
    fn test_cursor_boundaries() {
        let mut draft = Draft::from_text("ab");
        draft.move_cursor_right();
        assert_eq!(draft.cursor, 2);
        draft.move_cursor_home();
        draft.move_cursor_left();
        assert_eq!(draft.cursor, 0);
    }

    #[test]
    fn test_delete_word_backward() {
        let mut draft = Draft::from_text("buy some milk");
        draft.delete_word_backward();
        assert_eq!(draft.text, "buy some ");

        draft.delete_word_backward();
        assert_eq!(draft.text, "buy ");

        draft.delete_word_backward();
        assert_eq!(draft.text, "");
        assert_eq!(draft.cursor, 0);
    }

    #[test]
    fn test_word_motion() {
        let mut draft = Draft::from_text("one two  three");
        draft.move_to_previous_word();
        assert_eq!(draft.split(), ("one two  ", "three"));
        draft.move_to_previous_word();
        assert_eq!(draft.split(), ("one ", "two  three"));

        draft.move_to_next_word();
        assert_eq!(draft.split(), ("one two  ", "three"));
        draft.move_to_next_word();
        assert_eq!(draft.cursor, draft.text.len());
    }

    #[test]
    fn test_take_clears() {
        let mut draft = Draft::from_text("x");
        assert_eq!(draft.take(), "x");
        assert!(draft.is_empty());
        assert_eq!(draft.cursor, 0);
    }
}
