/// Position tracking for diagnostics
///
/// Converts byte offsets produced by the lexer into the `line:column`
/// form printed in parse errors.
use text_size::TextSize;

/// A position in source code (1-indexed, column counted in bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Compute the position of a byte offset within `text`.
    ///
    /// Offsets past the end of the text are clamped to the end.
    pub fn of_offset(text: &str, offset: TextSize) -> Self {
        let offset = usize::from(offset).min(text.len());
        let before = &text.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() as u32 + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        Self::new(line, (offset - line_start) as u32 + 1)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
