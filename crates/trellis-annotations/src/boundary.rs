//! Edge classification for annotation runs.
//!
//! Given a caret position, decides whether it sits at the start/end edge of
//! an annotated run, just outside one, strictly inside one, or nowhere near
//! one. The edit interceptor uses this to suppress style inheritance at run
//! edges.
//!
//! Positions are caret gaps; the mark sample "at" a position is the
//! inheritance set there (the marks of the character before the gap), which
//! is what an uninstrumented insertion would pick up.

use crate::document::AnnotationDoc;
use crate::mark::AnnotationMark;

/// Where a caret sits relative to an annotated run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// Strictly inside the run; default inheritance applies.
    Interior,
    /// At the run's start edge.
    StartEdge,
    /// At the run's end edge.
    EndEdge,
    /// One position before the run.
    JustBefore,
    /// One position past the run.
    JustAfter,
    /// Not adjacent to the run at all.
    Outside,
}

impl Boundary {
    /// Whether insertion here must be stripped of the run's mark.
    pub fn is_edge(&self) -> bool {
        matches!(
            self,
            Boundary::StartEdge | Boundary::EndEdge | Boundary::JustBefore | Boundary::JustAfter
        )
    }
}

/// Classify `caret` relative to the run of a specific branch.
///
/// Samples the inheritance sets at `caret`, `caret - 1` and `caret + 1`,
/// guarding both ends of the document; any out-of-range sample reads as "no
/// mark" and the function never errors.
///
/// Start-edge is checked before end-edge and the first match wins, so a
/// position satisfying both (a single-character run) classifies start-edge.
pub fn classify_branch(doc: &AnnotationDoc, caret: usize, branch: &str) -> Boundary {
    let len = doc.len_chars();
    let here = doc.marks_at_caret(caret).contains(branch);
    let before = caret > 0 && doc.marks_at_caret(caret - 1).contains(branch);
    let after = doc.marks_at_caret(caret + 1).contains(branch);

    if here && !before && caret > 0 {
        Boundary::StartEdge
    } else if here && !after && caret < len {
        Boundary::EndEdge
    } else if !here && before && !after {
        Boundary::JustAfter
    } else if !here && after && !before {
        Boundary::JustBefore
    } else if here {
        Boundary::Interior
    } else {
        Boundary::Outside
    }
}

/// Classify `caret` against whichever annotation is nearby.
///
/// Candidate marks are taken from the position itself first, then from the
/// neighbor samples; the first mark that classifies as something other than
/// `Outside` wins. Returns `None` when no annotation is adjacent.
pub fn classify(doc: &AnnotationDoc, caret: usize) -> Option<(AnnotationMark, Boundary)> {
    let mut candidates = doc.marks_at_caret(caret);
    if caret > 0 {
        for mark in doc.marks_at_caret(caret - 1).iter() {
            candidates.insert(mark.clone());
        }
    }
    for mark in doc.marks_at_caret(caret + 1).iter() {
        candidates.insert(mark.clone());
    }

    for mark in candidates.iter() {
        let boundary = classify_branch(doc, caret, &mark.branch);
        if boundary != Boundary::Outside {
            return Some((mark.clone(), boundary));
        }
    }
    None
}
