//! Source locations

use serde::{Deserialize, Serialize};

/// A region of source text.
///
/// `start` and `end` are char offsets into the source; `line` and `column`
/// are 1-based and point at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Zero-width span for synthesized tokens
    pub fn dummy() -> Self {
        Self::new(0, 0, 1, 1)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
