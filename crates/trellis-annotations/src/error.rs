//! Error types for annotation operations.

/// Errors surfaced by annotation document operations.
///
/// Position-resolution failures deliberately do NOT appear here: mark queries
/// at out-of-range positions resolve to "no mark" rather than erroring, so
/// typing is never blocked by a bad offset.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    /// A range was inverted or extended past the end of the document.
    #[error("invalid range {start}..{end} for document of length {len}")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },

    /// An annotation with this branch id already covers the range.
    #[error("branch {0} is already annotated here")]
    DuplicateBranch(crate::mark::BranchId),

    /// No annotation with this branch id exists in the document.
    #[error("no annotation for branch {0}")]
    UnknownBranch(crate::mark::BranchId),
}
