//! Editor actions and input types.
//!
//! Platform-agnostic definitions for editor operations. The `EditAction`
//! enum represents semantic editing operations, while `InputType` represents
//! the semantic intent from input events (browser beforeinput, key presses,
//! clipboard paste).

use smol_str::SmolStr;

/// A range in the document, measured in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalize range so start <= end.
    pub fn normalize(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self {
                start: self.end,
                end: self.start,
            }
        }
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl From<Range> for std::ops::Range<usize> {
    fn from(r: Range) -> Self {
        r.start..r.end
    }
}

/// Semantic input types the interceptor cares about.
///
/// Based on the W3C Input Events vocabulary as surfaced by `beforeinput`,
/// reduced to the insertion paths that can inherit annotation styling.
/// Everything else passes through to default editing behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    /// Insert typed text (direct key press path).
    InsertText,
    /// Insert text from IME composition.
    InsertCompositionText,
    /// Insert a line break (Shift+Enter).
    InsertLineBreak,
    /// Insert a paragraph break (Enter) - a run split.
    InsertParagraph,
    /// Insert from the clipboard paste path.
    InsertFromPaste,
    /// Insert replacement text (spell check correction, autocomplete).
    InsertReplacementText,
    /// Anything else - never intercepted.
    Unknown(String),
}

impl InputType {
    /// Whether this input type inserts text the interceptor may rewrite.
    pub fn is_insertion(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

/// Semantic edit operations the interceptor performs itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Insert text at the given range (replacing any selected content).
    Insert { text: SmolStr, range: Range },
    /// Split the run with a newline at the given range.
    SplitRun { range: Range },
}
