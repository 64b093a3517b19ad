//! trellis-annotations: pure annotation-editing logic without framework dependencies.
//!
//! This crate provides:
//! - `TextBuffer` trait for text storage abstraction
//! - `NoteRope` - ropey-backed implementation
//! - `AnnotationDoc` - text plus annotation mark spans, kept consistent across edits
//! - Boundary classification and edit interception at mark edges

pub mod actions;
pub mod boundary;
pub mod buffer;
pub mod document;
pub mod error;
pub mod intercept;
pub mod mark;
pub mod types;

pub use actions::{EditAction, InputType, Range};
pub use boundary::{classify, classify_branch, Boundary};
pub use buffer::{NoteRope, TextBuffer};
pub use document::{AnnotationDoc, CarriedMarks};
pub use error::AnnotationError;
pub use intercept::{execute_action, handle_input, post_edit_pass, InputContext, InterceptOutcome};
pub use mark::{AnnotationMark, BranchId, BranchKind, MarkSet, MarkSpan};
pub use smol_str::SmolStr;
pub use types::{Affinity, CursorState, EditInfo, Selection};
