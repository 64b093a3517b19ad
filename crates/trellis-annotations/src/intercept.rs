//! Boundary-aware edit interception.
//!
//! Three input paths reach the interceptor: direct key presses, generic
//! text-input (IME and paste-via-input), and explicit clipboard paste. When
//! the caret sits at the edge of an annotated run, the interceptor performs
//! the insertion itself with the run's mark stripped, so new text never
//! inherits the annotation. Everything else passes through to default
//! editing behavior.

use smol_str::SmolStr;

use crate::actions::{EditAction, InputType};
use crate::boundary::{classify, classify_branch, Boundary};
use crate::document::{AnnotationDoc, CarriedMarks};
use crate::mark::MarkSet;

/// Result of offering an input event to the interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptOutcome {
    /// The interceptor applied the edit; callers prevent the default
    /// insertion.
    Handled,
    /// Default editing behavior applies.
    PassThrough,
}

/// Context for one input event.
#[derive(Debug, Clone)]
pub struct InputContext {
    /// The semantic input type.
    pub input_type: InputType,
    /// The text to insert, if the event carries any.
    pub data: Option<SmolStr>,
    /// Whether the event is part of an IME composition.
    pub is_composing: bool,
}

impl InputContext {
    pub fn text(input_type: InputType, data: impl Into<SmolStr>) -> Self {
        Self {
            input_type,
            data: Some(data.into()),
            is_composing: false,
        }
    }
}

/// Offer an input event to the interceptor.
///
/// Engages only for a collapsed cursor whose position classifies as a run
/// edge; selections and interior positions are left to default behavior.
pub fn handle_input(doc: &mut AnnotationDoc, ctx: &InputContext) -> InterceptOutcome {
    // During composition the browser owns the text until compositionend.
    if ctx.is_composing {
        return InterceptOutcome::PassThrough;
    }

    let range = doc.current_range();
    if !range.is_caret() {
        // Non-collapsed selections are never intercepted.
        return InterceptOutcome::PassThrough;
    }
    let caret = range.start;

    let Some((mark, boundary)) = classify(doc, caret) else {
        return InterceptOutcome::PassThrough;
    };
    if !boundary.is_edge() {
        return InterceptOutcome::PassThrough;
    }

    let action = match ctx.input_type {
        InputType::InsertText
        | InputType::InsertCompositionText
        | InputType::InsertFromPaste
        | InputType::InsertReplacementText => match &ctx.data {
            Some(data) if !data.is_empty() => EditAction::Insert {
                text: data.clone(),
                range,
            },
            _ => return InterceptOutcome::PassThrough,
        },
        InputType::InsertParagraph | InputType::InsertLineBreak => {
            EditAction::SplitRun { range }
        }
        InputType::Unknown(_) => return InterceptOutcome::PassThrough,
    };

    // Strip the run's mark from whatever formatting the insertion would
    // otherwise carry.
    let mut carried = doc
        .pending_marks
        .take()
        .unwrap_or_else(|| doc.marks_at_caret(caret));
    carried.remove(&mark.branch);

    tracing::debug!(
        caret,
        branch = %mark.branch,
        ?boundary,
        "intercepted edge insertion"
    );
    execute_action(doc, &action, carried);
    InterceptOutcome::Handled
}

/// Apply a semantic edit with an explicit carried mark set.
pub fn execute_action(doc: &mut AnnotationDoc, action: &EditAction, carried: MarkSet) {
    match action {
        EditAction::Insert { text, range } => {
            doc.insert(range.start, text, CarriedMarks::Explicit(carried));
        }
        EditAction::SplitRun { range } => {
            doc.insert(range.start, "\n", CarriedMarks::Explicit(carried));
        }
    }
}

/// Post-edit correctness pass.
///
/// Runs after every transaction: if any pending "about to apply this
/// annotation" state survives while the cursor now sits at an edge of (or
/// outside) that run, the state is cleared so it cannot leak onto later
/// insertions.
pub fn post_edit_pass(doc: &mut AnnotationDoc) {
    let Some(pending) = doc.pending_marks.take() else {
        return;
    };
    let caret = doc.cursor.offset;

    let kept: MarkSet = pending
        .iter()
        .filter(|mark| {
            let boundary = classify_branch(doc, caret, &mark.branch);
            boundary == Boundary::Interior
        })
        .cloned()
        .collect();

    if kept.len() != pending.len() {
        tracing::trace!(caret, "cleared stale pending annotation state");
    }
    if !kept.is_empty() {
        doc.pending_marks = Some(kept);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mark::{AnnotationMark, BranchKind};
    use crate::types::{CursorState, Selection};

    /// "abcdefgh" with chars 2..5 ("cde") annotated, cursor at `caret`.
    fn doc_at(caret: usize) -> AnnotationDoc {
        let mut doc = AnnotationDoc::new("abcdefgh");
        doc.annotate(2..5, AnnotationMark::new("b1", BranchKind::Note))
            .unwrap();
        doc.cursor = CursorState::new(caret);
        doc
    }

    #[test]
    fn test_end_edge_insertion_is_stripped() {
        let mut doc = doc_at(5);
        let outcome = handle_input(&mut doc, &InputContext::text(InputType::InsertText, "X"));
        assert_eq!(outcome, InterceptOutcome::Handled);
        assert_eq!(doc.content(), "abcdeXfgh");
        // The run did not grow and the new char carries no mark.
        let span = doc.span_for("b1").unwrap();
        assert_eq!((span.start, span.end), (2, 5));
        assert!(doc.marks_at_char(5).is_empty());
    }

    #[test]
    fn test_interior_insertion_passes_through_and_inherits() {
        let mut doc = doc_at(4);
        let outcome = handle_input(&mut doc, &InputContext::text(InputType::InsertText, "X"));
        assert_eq!(outcome, InterceptOutcome::PassThrough);

        // Default behavior: the insertion inherits and the run grows.
        doc.insert(4, "X", crate::document::CarriedMarks::Inherit);
        let span = doc.span_for("b1").unwrap();
        assert_eq!((span.start, span.end), (2, 6));
        assert!(doc.marks_at_char(4).contains("b1"));
    }

    #[test]
    fn test_selection_never_intercepted() {
        let mut doc = doc_at(5);
        doc.selection = Some(Selection::new(3, 6));
        let outcome = handle_input(&mut doc, &InputContext::text(InputType::InsertText, "X"));
        assert_eq!(outcome, InterceptOutcome::PassThrough);
        assert_eq!(doc.content(), "abcdefgh");
    }

    #[test]
    fn test_composition_passes_through() {
        let mut doc = doc_at(5);
        let ctx = InputContext {
            input_type: InputType::InsertCompositionText,
            data: Some("か".into()),
            is_composing: true,
        };
        assert_eq!(handle_input(&mut doc, &ctx), InterceptOutcome::PassThrough);
    }

    #[test]
    fn test_paste_at_edge_is_stripped() {
        let mut doc = doc_at(5);
        let ctx = InputContext::text(InputType::InsertFromPaste, "pasted text");
        assert_eq!(handle_input(&mut doc, &ctx), InterceptOutcome::Handled);
        assert_eq!(doc.content(), "abcdepasted textfgh");
        assert_eq!(doc.span_for("b1").unwrap().end, 5);
    }

    #[test]
    fn test_newline_splits_without_inheriting() {
        let mut doc = doc_at(5);
        let ctx = InputContext {
            input_type: InputType::InsertParagraph,
            data: None,
            is_composing: false,
        };
        assert_eq!(handle_input(&mut doc, &ctx), InterceptOutcome::Handled);
        assert_eq!(doc.content(), "abcde\nfgh");
        assert_eq!(doc.span_for("b1").unwrap().end, 5);
    }

    #[test]
    fn test_missing_data_passes_through() {
        let mut doc = doc_at(5);
        let ctx = InputContext {
            input_type: InputType::InsertText,
            data: None,
            is_composing: false,
        };
        assert_eq!(handle_input(&mut doc, &ctx), InterceptOutcome::PassThrough);
    }

    #[test]
    fn test_outside_run_passes_through() {
        let mut doc = doc_at(0);
        let ctx = InputContext::text(InputType::InsertText, "X");
        assert_eq!(handle_input(&mut doc, &ctx), InterceptOutcome::PassThrough);
    }

    #[test]
    fn test_post_edit_pass_clears_pending_at_edge() {
        let mut doc = doc_at(5);
        doc.pending_marks = Some(MarkSet::single(AnnotationMark::new(
            "b1",
            BranchKind::Note,
        )));
        post_edit_pass(&mut doc);
        assert!(doc.pending_marks.is_none());
    }

    #[test]
    fn test_post_edit_pass_keeps_pending_interior() {
        let mut doc = doc_at(4);
        doc.pending_marks = Some(MarkSet::single(AnnotationMark::new(
            "b1",
            BranchKind::Note,
        )));
        post_edit_pass(&mut doc);
        assert!(doc.pending_marks.is_some());
    }

    #[test]
    fn test_post_edit_pass_noop_without_pending() {
        let mut doc = doc_at(4);
        post_edit_pass(&mut doc);
        assert!(doc.pending_marks.is_none());
    }
}
