//! Core editor types: cursor, selection, and edit tracking.
//!
//! These types are framework-agnostic and can be used with any text buffer
//! implementation.

use web_time::Instant;

/// Cursor state including position and affinity.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct CursorState {
    /// Character offset in text (NOT byte offset!)
    pub offset: usize,

    /// Prefer left/right when at a boundary (for vertical cursor movement)
    pub affinity: Affinity,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            offset: 0,
            affinity: Affinity::Before,
        }
    }
}

impl CursorState {
    /// Create a new cursor at the given offset.
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            affinity: Affinity::Before,
        }
    }
}

/// Cursor affinity for vertical movement.
///
/// `Before` means stick to the end of the previous line, `After` means stick
/// to the start of the next line.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum Affinity {
    #[default]
    Before,
    After,
}

/// Text selection with anchor and head positions.
///
/// The anchor is where the selection started, the head is where the cursor is
/// now. They may be in any order - use `start()` and `end()` for ordered
/// bounds.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where selection started
    pub anchor: usize,
    /// Where cursor is now
    pub head: usize,
}

impl Selection {
    /// Create a new selection.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor position).
    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Get the start (lower bound) of the selection.
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Get the end (upper bound) of the selection.
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Check if the selection is collapsed (empty, cursor only).
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Check if an offset is within the selection.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start() && offset < self.end()
    }

    /// Get the selection length.
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Check if empty (same as is_collapsed).
    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Check if the selection is backwards (head before anchor).
    pub fn is_backwards(&self) -> bool {
        self.head < self.anchor
    }
}

/// Information about the most recent edit.
///
/// Tracks enough to decide which annotation affordances need refreshing after
/// an edit, and to detect stale state between render cycles.
#[derive(Clone, Debug)]
pub struct EditInfo {
    /// Character offset where the edit occurred
    pub edit_char_pos: usize,
    /// Number of characters inserted
    pub inserted_len: usize,
    /// Number of characters deleted
    pub deleted_len: usize,
    /// Whether the edit contains a newline (run-splitting)
    pub contains_newline: bool,
    /// Document length (in chars) after this edit was applied.
    /// If the current doc length doesn't match, the edit info is from a
    /// previous cycle and shouldn't be used.
    pub doc_len_after: usize,
    /// When this edit occurred.
    pub timestamp: Instant,
}

impl PartialEq for EditInfo {
    fn eq(&self, other: &Self) -> bool {
        // Compare all fields except timestamp (not meaningful for equality)
        self.edit_char_pos == other.edit_char_pos
            && self.inserted_len == other.inserted_len
            && self.deleted_len == other.deleted_len
            && self.contains_newline == other.contains_newline
            && self.doc_len_after == other.doc_len_after
    }
}

impl EditInfo {
    /// Check if this edit info is stale (doc has changed since this edit).
    pub fn is_stale(&self, current_doc_len: usize) -> bool {
        self.doc_len_after != current_doc_len
    }

    /// Get the range occupied by the inserted text, if any.
    pub fn affected_range(&self) -> std::ops::Range<usize> {
        self.edit_char_pos..self.edit_char_pos + self.inserted_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_bounds() {
        let sel = Selection::new(5, 10);
        assert_eq!(sel.start(), 5);
        assert_eq!(sel.end(), 10);
        assert!(!sel.is_backwards());

        let sel = Selection::new(10, 5);
        assert_eq!(sel.start(), 5);
        assert_eq!(sel.end(), 10);
        assert!(sel.is_backwards());
    }

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(7);
        assert!(sel.is_collapsed());
        assert!(sel.is_empty());
        assert_eq!(sel.len(), 0);
        assert_eq!(sel.start(), 7);
        assert_eq!(sel.end(), 7);
    }

    #[test]
    fn test_selection_contains() {
        let sel = Selection::new(5, 10);
        assert!(!sel.contains(4));
        assert!(sel.contains(5));
        assert!(sel.contains(9));
        assert!(!sel.contains(10)); // end is exclusive
    }

    #[test]
    fn test_edit_info_stale() {
        let edit = EditInfo {
            edit_char_pos: 5,
            inserted_len: 3,
            deleted_len: 0,
            contains_newline: false,
            doc_len_after: 100,
            timestamp: Instant::now(),
        };

        assert!(!edit.is_stale(100));
        assert!(edit.is_stale(101));
    }
}
