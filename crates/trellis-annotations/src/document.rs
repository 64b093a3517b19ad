//! Annotated document: text buffer plus mark spans kept consistent across
//! edits.
//!
//! The document is the single source of truth for annotation placement.
//! Inserted text carries marks according to the usual editing rules: by
//! default it inherits the marks of the character before the caret (or the
//! one-shot `pending_marks` override), and a run grows to absorb text typed
//! strictly inside it. The edit interceptor suppresses inheritance at run
//! edges by passing an explicit mark set.

use std::ops::Range;

use crate::buffer::{NoteRope, TextBuffer};
use crate::error::AnnotationError;
use crate::mark::{AnnotationMark, BranchId, MarkSet, MarkSpan};
use crate::types::{CursorState, EditInfo, Selection};

/// How an insertion decides which marks the new text carries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CarriedMarks {
    /// Inherit: `pending_marks` if set, otherwise the marks of the character
    /// before the caret.
    #[default]
    Inherit,
    /// Carry exactly this set. `MarkSet::empty()` strips everything.
    Explicit(MarkSet),
}

/// Text plus annotation spans.
#[derive(Clone, Default)]
pub struct AnnotationDoc {
    buffer: NoteRope,
    /// Sorted by start offset. Zero-length spans are never kept.
    spans: Vec<MarkSpan>,

    /// Current cursor position.
    pub cursor: CursorState,
    /// Active selection if any.
    pub selection: Option<Selection>,
    /// One-shot mark override for the next insertion ("about to apply this
    /// annotation"). Cleared by the post-edit pass when the cursor leaves
    /// the run it belongs to.
    pub pending_marks: Option<MarkSet>,
}

impl AnnotationDoc {
    pub fn new(content: &str) -> Self {
        Self {
            buffer: NoteRope::from_str(content),
            ..Self::default()
        }
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    pub fn slice(&self, range: Range<usize>) -> Option<smol_str::SmolStr> {
        self.buffer.slice(range)
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.buffer.char_at(offset)
    }

    pub fn last_edit(&self) -> Option<EditInfo> {
        self.buffer.last_edit()
    }

    pub fn spans(&self) -> &[MarkSpan] {
        &self.spans
    }

    /// Marks carried by the character at `index`.
    ///
    /// Out-of-range indices resolve to the empty set - a bad offset must
    /// never block typing.
    pub fn marks_at_char(&self, index: usize) -> MarkSet {
        if index >= self.buffer.len_chars() {
            return MarkSet::empty();
        }
        self.spans
            .iter()
            .filter(|s| s.covers(index))
            .map(|s| s.mark.clone())
            .collect()
    }

    /// The inheritance set at a caret position: marks of the character
    /// before the gap. Empty at the document start and for out-of-range
    /// positions.
    pub fn marks_at_caret(&self, caret: usize) -> MarkSet {
        if caret == 0 || caret > self.buffer.len_chars() {
            return MarkSet::empty();
        }
        self.marks_at_char(caret - 1)
    }

    /// The span placing `branch` in the document, if present.
    pub fn span_for(&self, branch: &str) -> Option<&MarkSpan> {
        self.spans.iter().find(|s| s.mark.branch == branch)
    }

    /// Annotate `range` with a new mark.
    pub fn annotate(
        &mut self,
        range: Range<usize>,
        mark: AnnotationMark,
    ) -> Result<(), AnnotationError> {
        let len = self.buffer.len_chars();
        if range.start >= range.end || range.end > len {
            return Err(AnnotationError::InvalidRange {
                start: range.start,
                end: range.end,
                len,
            });
        }
        if self.span_for(&mark.branch).is_some() {
            return Err(AnnotationError::DuplicateBranch(mark.branch));
        }
        self.spans.push(MarkSpan::new(mark, range.start, range.end));
        self.spans.sort_by_key(|s| s.start);
        Ok(())
    }

    /// Remove the annotation for `branch`, leaving its text in place.
    pub fn remove_annotation(&mut self, branch: &str) -> Result<(), AnnotationError> {
        let before = self.spans.len();
        self.spans.retain(|s| s.mark.branch != branch);
        if self.spans.len() == before {
            return Err(AnnotationError::UnknownBranch(BranchId::from(branch)));
        }
        Ok(())
    }

    /// Insert text at a caret position.
    ///
    /// `carried` decides the marks of the new text; span bounds are adjusted
    /// so runs grow, stay put, or split accordingly. The caret is clamped
    /// into bounds rather than erroring.
    pub fn insert(&mut self, caret: usize, text: &str, carried: CarriedMarks) {
        if text.is_empty() {
            return;
        }
        let caret = caret.min(self.buffer.len_chars());
        let marks = match carried {
            CarriedMarks::Explicit(set) => set,
            CarriedMarks::Inherit => self
                .pending_marks
                .take()
                .unwrap_or_else(|| self.marks_at_caret(caret)),
        };
        let n = text.chars().count();

        let mut split_off = Vec::new();
        for span in &mut self.spans {
            if caret <= span.start {
                if caret == span.start && marks.contains(&span.mark.branch) {
                    // Extend leftward: new text joins the run.
                    span.end += n;
                } else {
                    span.start += n;
                    span.end += n;
                }
            } else if caret >= span.end {
                if caret == span.end && marks.contains(&span.mark.branch) {
                    span.end += n;
                }
            } else if marks.contains(&span.mark.branch) {
                // Strictly inside and carrying the mark: the run absorbs it.
                span.end += n;
            } else {
                // Strictly inside without the mark: the run splits around
                // the unmarked insertion.
                split_off.push(MarkSpan::new(span.mark.clone(), caret + n, span.end + n));
                span.end = caret;
            }
        }
        self.spans.extend(split_off);
        self.spans.sort_by_key(|s| s.start);

        self.buffer.insert(caret, text);
        self.cursor = CursorState::new(caret + n);
        self.selection = None;
    }

    /// Delete a char range, contracting or dropping overlapping spans.
    pub fn delete(&mut self, range: Range<usize>) {
        let len = self.buffer.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return;
        }
        let removed = end - start;

        let shift = |x: usize| -> usize {
            if x <= start {
                x
            } else if x >= end {
                x - removed
            } else {
                start
            }
        };
        for span in &mut self.spans {
            span.start = shift(span.start);
            span.end = shift(span.end);
        }
        self.spans.retain(|s| s.start < s.end);

        self.buffer.delete(start..end);
        self.cursor = CursorState::new(start);
        self.selection = None;
    }

    /// Replace a range with new text (delete, then insert with `carried`).
    pub fn replace(&mut self, range: Range<usize>, text: &str, carried: CarriedMarks) {
        let start = range.start;
        self.delete(range);
        self.insert(start, text, carried);
    }

    /// The range the next edit applies to: the selection if one is active,
    /// otherwise a caret at the cursor.
    pub fn current_range(&self) -> crate::actions::Range {
        match self.selection {
            Some(sel) => crate::actions::Range::new(sel.start(), sel.end()),
            None => crate::actions::Range::caret(self.cursor.offset),
        }
    }
}

impl std::fmt::Debug for AnnotationDoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationDoc")
            .field("len_chars", &self.buffer.len_chars())
            .field("spans", &self.spans)
            .field("cursor", &self.cursor)
            .field("selection", &self.selection)
            .finish()
    }
}
