//! Character cursor for traversing CoNLL-U source text.
//!
//! Tracks byte position and 1-based line/column, handling UTF-8 correctly
//! while fast-pathing the ASCII case that dominates real treebank text.

/// A cursor for traversing CoNLL-U source character by character.
pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
}

/// A saved cursor position, for backtracking during lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorSnapshot {
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the current character, or `'\0'` at end of input.
    pub fn current_char(&self) -> char {
        self.char_at(0)
    }

    /// Returns the character `offset` bytes ahead of the current position.
    #[inline]
    pub fn char_at(&self, offset: usize) -> char {
        let pos = self.position + offset;
        if pos >= self.source.len() {
            return '\0';
        }
        let b = self.source.as_bytes()[pos];
        if b < 128 {
            return b as char;
        }
        self.source[pos..].chars().next().unwrap_or('\0')
    }

    /// Returns the character `offset` characters ahead (alias of
    /// [`Cursor::char_at`]; CoNLL-U lookahead never needs more than one or
    /// two bytes so the distinction between byte- and char-offsets doesn't
    /// matter in practice for ASCII, but the name documents intent at call
    /// sites).
    #[inline]
    pub fn peek_char(&self, offset: usize) -> char {
        self.char_at(offset)
    }

    /// Advances past the current character, updating line/column.
    #[inline]
    pub fn advance(&mut self) {
        if self.position >= self.source.len() {
            return;
        }
        let b = self.source.as_bytes()[self.position];
        if b < 128 {
            self.position += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            return;
        }
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Returns true once every byte of `source` has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// The 1-based line of the character under the cursor.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The 1-based column of the character under the cursor.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// The current byte offset into `source`.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The slice of `source` from byte offset `start` up to (not
    /// including) the cursor's current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    /// Captures the current position so lexing can backtrack to it.
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    /// Restores a previously captured position.
    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_through_ascii() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.current_char(), 'a');
        cursor.advance();
        assert_eq!(cursor.current_char(), 'b');
        cursor.advance();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn tracks_line_and_column_across_newlines() {
        let mut cursor = Cursor::new("a\nbc");
        assert_eq!((cursor.line(), cursor.column()), (1, 1));
        cursor.advance(); // 'a'
        assert_eq!((cursor.line(), cursor.column()), (1, 2));
        cursor.advance(); // '\n'
        assert_eq!((cursor.line(), cursor.column()), (2, 1));
        cursor.advance(); // 'b'
        assert_eq!((cursor.line(), cursor.column()), (2, 2));
    }

    #[test]
    fn snapshot_and_restore_round_trip() {
        let mut cursor = Cursor::new("abcd");
        cursor.advance();
        cursor.advance();
        let snap = cursor.snapshot();
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
        cursor.restore(snap);
        assert_eq!(cursor.current_char(), 'c');
    }

    #[test]
    fn handles_multibyte_utf8() {
        let mut cursor = Cursor::new("é_");
        let start = cursor.position();
        cursor.advance();
        assert_eq!(cursor.slice_from(start), "é");
        assert_eq!(cursor.current_char(), '_');
        assert_eq!(cursor.column(), 2);
    }
}
