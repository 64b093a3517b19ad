//! Annotation marks: the styled runs that tie editor text to branch records.
//!
//! A mark names a branch (the externally-stored note/explore/promote record)
//! and is carried by a contiguous run of characters. Marks are value types;
//! the spans that place them in a document live in [`MarkSpan`].

use smol_str::SmolStr;
use std::fmt;

/// Identifier of the branch record backing an annotation.
pub type BranchId = SmolStr;

/// Category of the branch behind an annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchKind {
    Note,
    Explore,
    Promote,
}

impl BranchKind {
    /// Wire name used by the backing API and CSS class names.
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchKind::Note => "note",
            BranchKind::Explore => "explore",
            BranchKind::Promote => "promote",
        }
    }

    /// Parse a wire name. Unknown names resolve to `None` rather than
    /// erroring; callers degrade to the default styling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "note" => Some(BranchKind::Note),
            "explore" => Some(BranchKind::Explore),
            "promote" => Some(BranchKind::Promote),
            _ => None,
        }
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single annotation mark: branch identity plus category.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnnotationMark {
    pub branch: BranchId,
    pub kind: BranchKind,
}

impl AnnotationMark {
    pub fn new(branch: impl Into<BranchId>, kind: BranchKind) -> Self {
        Self {
            branch: branch.into(),
            kind,
        }
    }
}

/// The set of marks in effect at a position.
///
/// Documents rarely stack more than one annotation on a character, so this is
/// a plain vector with set-like helpers rather than a hash set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkSet {
    marks: Vec<AnnotationMark>,
}

impl MarkSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(mark: AnnotationMark) -> Self {
        Self { marks: vec![mark] }
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn contains(&self, branch: &str) -> bool {
        self.marks.iter().any(|m| m.branch == branch)
    }

    pub fn insert(&mut self, mark: AnnotationMark) {
        if !self.contains(&mark.branch) {
            self.marks.push(mark);
        }
    }

    /// Remove the mark for `branch`, returning whether it was present.
    pub fn remove(&mut self, branch: &str) -> bool {
        let before = self.marks.len();
        self.marks.retain(|m| m.branch != branch);
        self.marks.len() != before
    }

    /// A copy of this set without the mark for `branch`.
    pub fn without(&self, branch: &str) -> Self {
        Self {
            marks: self
                .marks
                .iter()
                .filter(|m| m.branch != branch)
                .cloned()
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotationMark> {
        self.marks.iter()
    }

    /// The first mark in the set, if any. Used when a caller needs "the"
    /// annotation at a position and stacking is not in play.
    pub fn first(&self) -> Option<&AnnotationMark> {
        self.marks.first()
    }
}

impl FromIterator<AnnotationMark> for MarkSet {
    fn from_iter<T: IntoIterator<Item = AnnotationMark>>(iter: T) -> Self {
        let mut set = MarkSet::empty();
        for mark in iter {
            set.insert(mark);
        }
        set
    }
}

/// A mark placed over a half-open char range of the document.
///
/// Invariant: `start < end`. Spans that contract to zero length during edits
/// are removed by the owning document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkSpan {
    pub mark: AnnotationMark,
    pub start: usize,
    pub end: usize,
}

impl MarkSpan {
    pub fn new(mark: AnnotationMark, start: usize, end: usize) -> Self {
        debug_assert!(start < end, "mark span must cover at least one char");
        Self { mark, start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether the char at `index` carries this mark.
    pub fn covers(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [BranchKind::Note, BranchKind::Explore, BranchKind::Promote] {
            assert_eq!(BranchKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(BranchKind::parse("archive"), None);
    }

    #[test]
    fn test_mark_set_dedup() {
        let mut set = MarkSet::empty();
        set.insert(AnnotationMark::new("b1", BranchKind::Note));
        set.insert(AnnotationMark::new("b1", BranchKind::Note));
        assert_eq!(set.len(), 1);
        assert!(set.contains("b1"));
        assert!(!set.contains("b2"));
    }

    #[test]
    fn test_mark_set_without() {
        let set: MarkSet = [
            AnnotationMark::new("b1", BranchKind::Note),
            AnnotationMark::new("b2", BranchKind::Explore),
        ]
        .into_iter()
        .collect();

        let stripped = set.without("b1");
        assert!(!stripped.contains("b1"));
        assert!(stripped.contains("b2"));
        // Original untouched.
        assert!(set.contains("b1"));
    }

    #[test]
    fn test_span_covers() {
        let span = MarkSpan::new(AnnotationMark::new("b", BranchKind::Note), 3, 6);
        assert!(!span.covers(2));
        assert!(span.covers(3));
        assert!(span.covers(5));
        assert!(!span.covers(6));
    }
}
