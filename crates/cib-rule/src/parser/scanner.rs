//! Character cursor over rule text
//!
//! The scanner works on characters, not bytes, so every offset it reports is
//! a character offset into the rule.

/// Position of a character in the rule text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    /// Character offset (0-indexed)
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Backtracking cursor used by the grammar
#[derive(Debug, Clone)]
pub struct Scanner {
    input: Vec<char>,
    position: usize,
}

impl Scanner {
    /// Create a new scanner at the start of the input
    pub fn new(input: &str) -> Self {
        Self { input: input.chars().collect(), position: 0 }
    }

    /// Current character offset
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move back to an earlier offset
    pub fn reset(&mut self, position: usize) {
        self.position = position.min(self.input.len());
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        Some(ch)
    }

    /// Skip spaces, tabs and line breaks; other Unicode spaces are text
    pub fn skip_whitespace(&mut self) {
        while matches!(self.current_char(), Some(' ' | '\t' | '\r' | '\n')) {
            self.position += 1;
        }
    }

    /// Consume `expected` if it is the current character
    pub fn eat_char(&mut self, expected: char) -> bool {
        if self.current_char() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Consume a keyword, ignoring ASCII case
    ///
    /// The keyword must not run into a following identifier character, so
    /// `op` does not match the start of `operation`.
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        let start = self.position;
        for expected in keyword.chars() {
            match self.advance() {
                Some(ch) if ch.eq_ignore_ascii_case(&expected) => {}
                _ => {
                    self.position = start;
                    return false;
                }
            }
        }
        if matches!(self.current_char(), Some(ch) if is_ident_char(ch)) {
            self.position = start;
            return false;
        }
        true
    }

    /// Consume the longest run of characters matching `pred`
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut run = String::new();
        while let Some(ch) = self.current_char() {
            if !pred(ch) {
                break;
            }
            run.push(ch);
            self.position += 1;
        }
        run
    }

    /// Text between two character offsets
    pub fn text(&self, start: usize, end: usize) -> String {
        let end = end.min(self.input.len());
        self.input[start.min(end)..end].iter().collect()
    }

    /// Line and column of a character offset
    pub fn locate(&self, offset: usize) -> SourcePosition {
        let offset = offset.min(self.input.len());
        let before = &self.input[..offset];
        let line = before.iter().filter(|&&ch| ch == '\n').count() + 1;
        let column = match before.iter().rposition(|&ch| ch == '\n') {
            Some(newline) => offset - newline,
            None => offset + 1,
        };
        SourcePosition { offset, line, column }
    }

    /// Text of the line containing a character offset, without the newline
    pub fn line_text(&self, offset: usize) -> String {
        let offset = offset.min(self.input.len());
        let start = self.input[..offset]
            .iter()
            .rposition(|&ch| ch == '\n')
            .map_or(0, |newline| newline + 1);
        let end = self.input[offset..]
            .iter()
            .position(|&ch| ch == '\n')
            .map_or(self.input.len(), |len| offset + len);
        self.input[start..end].iter().collect()
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}
