//! The insert-annotation action.
//!
//! Creates a branch through the active provider, marks the selected text,
//! and announces the result to the rest of the application. Missing context
//! (no selection, no note id) short-circuits with a warning and no state
//! mutation.

use trellis_annotations::{AnnotationDoc, AnnotationMark, BranchId, BranchKind};
use trellis_browser::emit::{self, UiEvent};

use crate::providers::BranchProvider;

/// Annotate the current selection as a new branch of `kind`.
///
/// Returns the new branch id, or `None` when the action short-circuited.
pub async fn insert_annotation(
    doc: &mut AnnotationDoc,
    provider: &BranchProvider,
    note_id: &str,
    kind: BranchKind,
) -> Option<BranchId> {
    if note_id.is_empty() {
        tracing::warn!("insert-annotation without a note id");
        return None;
    }
    let Some(selection) = doc.selection else {
        tracing::warn!("insert-annotation without selected text");
        return None;
    };
    if selection.is_collapsed() {
        tracing::warn!("insert-annotation with an empty selection");
        return None;
    }
    let (start, end) = (selection.start(), selection.end());
    let title = doc.slice(start..end).map(|s| s.to_string())?;

    let branch = match provider.create_branch(note_id, &title, kind).await {
        Ok(branch) => branch,
        Err(err) => {
            tracing::warn!(%err, "branch creation failed");
            return None;
        }
    };

    if let Err(err) = doc.annotate(start..end, AnnotationMark::new(branch.clone(), kind)) {
        tracing::warn!(%err, "could not place annotation");
        return None;
    }

    emit::dispatch(&UiEvent::InsertAnnotation {
        branch: branch.clone(),
        kind,
        start,
        end,
    });
    Some(branch)
}

/// Announce a cross-note annotation (the global variant): other modules
/// decide where it lands.
pub fn insert_annotation_global(branch: BranchId, kind: BranchKind) {
    emit::dispatch(&UiEvent::InsertAnnotationGlobal { branch, kind });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::LocalProvider;
    use std::future::Future;
    use std::pin::pin;
    use std::task::{Context, Poll};
    use trellis_annotations::Selection;

    /// The in-memory providers complete immediately; poll once.
    fn resolve<F: Future>(future: F) -> F::Output {
        let mut future = pin!(future);
        let waker = std::task::Waker::noop();
        let mut cx = Context::from_waker(waker);
        match future.as_mut().poll(&mut cx) {
            Poll::Ready(value) => value,
            Poll::Pending => unreachable!("in-memory provider future suspended"),
        }
    }

    fn provider() -> BranchProvider {
        BranchProvider::Local(LocalProvider::new())
    }

    #[test]
    fn test_annotates_selection_and_creates_branch() {
        let mut doc = AnnotationDoc::new("pick this phrase apart");
        doc.selection = Some(Selection::new(5, 16));
        let provider = provider();

        let branch = resolve(insert_annotation(
            &mut doc,
            &provider,
            "n1",
            BranchKind::Explore,
        ))
        .unwrap();

        let span = doc.span_for(&branch).unwrap();
        assert_eq!((span.start, span.end), (5, 16));
        let listed = resolve(provider.branches("n1")).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "this phrase");
    }

    #[test]
    fn test_no_selection_short_circuits() {
        let mut doc = AnnotationDoc::new("abc");
        let provider = provider();
        assert!(resolve(insert_annotation(&mut doc, &provider, "n1", BranchKind::Note)).is_none());
        assert!(doc.spans().is_empty());
        assert!(resolve(provider.branches("n1")).unwrap().is_empty());
    }

    #[test]
    fn test_collapsed_selection_short_circuits() {
        let mut doc = AnnotationDoc::new("abc");
        doc.selection = Some(Selection::collapsed(1));
        let provider = provider();
        assert!(resolve(insert_annotation(&mut doc, &provider, "n1", BranchKind::Note)).is_none());
        assert!(doc.spans().is_empty());
    }

    #[test]
    fn test_missing_note_id_short_circuits() {
        let mut doc = AnnotationDoc::new("abc");
        doc.selection = Some(Selection::new(0, 2));
        let provider = provider();
        assert!(resolve(insert_annotation(&mut doc, &provider, "", BranchKind::Note)).is_none());
        assert!(doc.spans().is_empty());
    }
}
